use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::client::ChatError;
use crate::config::ChatConfig;

/// Sequential attempts with a doubling pause between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&ChatConfig> for RetryPolicy {
    fn from(cfg: &ChatConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_millis(cfg.base_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// Pause after the zero-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, ChatError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ChatError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last = None;
    for attempt in 0..attempts {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) => {
                warn!(attempt = attempt + 1, max = attempts, error = %e, "chat attempt failed");
                last = Some(e);
                if attempt + 1 < attempts {
                    tokio::time::sleep(policy.delay_for(attempt)).await;
                }
            }
        }
    }
    Err(ChatError::Exhausted {
        attempts,
        source: Box::new(last.unwrap_or(ChatError::EmptyReply)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn delay_doubles() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(0), Duration::from_millis(1000));
        assert_eq!(p.delay_for(1), Duration::from_millis(2000));
        assert_eq!(p.delay_for(3), Duration::from_millis(8000));
        // no overflow panic on absurd attempt numbers
        assert!(p.delay_for(64) >= p.delay_for(31));
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let calls = AtomicU32::new(0);
        let out = with_backoff(&fast(5), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(ChatError::Status(503, "busy".into()))
                } else {
                    Ok("namaste")
                }
            }
        })
        .await;
        assert_eq!(out.unwrap(), "namaste");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let out: Result<(), _> = with_backoff(&fast(4), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ChatError::EmptyReply) }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match out.unwrap_err() {
            ChatError::Exhausted { attempts, source } => {
                assert_eq!(attempts, 4);
                assert!(matches!(*source, ChatError::EmptyReply));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn waits_between_attempts_but_not_after_last() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        };
        let start = Instant::now();
        let _: Result<(), _> =
            with_backoff(&policy, |_| async { Err(ChatError::EmptyReply) }).await;
        let elapsed = start.elapsed();
        // 50ms + 100ms of pauses, none after the third failure
        assert!(elapsed >= Duration::from_millis(150));
        assert!(elapsed < Duration::from_millis(350));
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let calls = AtomicU32::new(0);
        let _: Result<(), _> = with_backoff(&fast(0), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ChatError::EmptyReply) }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
