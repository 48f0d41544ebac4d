use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::builder::{PatientDetails, PlanBuilder, PlanError};

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_MAX_PER_OWNER: usize = 16;

struct PlanSession {
    owner: Uuid,
    builder: PlanBuilder,
    last_touched: Instant,
}

/// Builder sessions held in process memory only; a restart drops them.
///
/// Sessions idle longer than `idle_ttl` are dropped whenever a new one is
/// created, and each owner keeps at most `max_per_owner` live sessions.
#[derive(Clone)]
pub struct PlanStore {
    sessions: Arc<RwLock<HashMap<Uuid, PlanSession>>>,
    idle_ttl: Duration,
    max_per_owner: usize,
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_PER_OWNER)
    }
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_ttl: Duration, max_per_owner: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_per_owner: max_per_owner.max(1),
        }
    }

    pub async fn create(&self, owner: Uuid, patient: PatientDetails) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_touched) <= self.idle_ttl);
        let expired = before - sessions.len();

        let mut owned: Vec<(Instant, Uuid)> = sessions
            .iter()
            .filter(|(_, s)| s.owner == owner)
            .map(|(id, s)| (s.last_touched, *id))
            .collect();
        let mut dropped = 0;
        if owned.len() >= self.max_per_owner {
            owned.sort();
            for (_, old) in owned.iter().take(owned.len() + 1 - self.max_per_owner) {
                sessions.remove(old);
                dropped += 1;
            }
        }
        if expired + dropped > 0 {
            debug!(expired, dropped, %owner, "plan sessions evicted");
        }

        sessions.insert(
            id,
            PlanSession {
                owner,
                builder: PlanBuilder::new(patient),
                last_touched: now,
            },
        );
        info!(plan_id = %id, %owner, "plan session created");
        id
    }

    /// Reads a session. Counts as activity for idle eviction.
    pub async fn read<R>(
        &self,
        id: Uuid,
        owner: Uuid,
        f: impl FnOnce(&PlanBuilder) -> R,
    ) -> Result<R, PlanError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(s) if s.owner == owner => {
                s.last_touched = Instant::now();
                Ok(f(&s.builder))
            }
            _ => Err(PlanError::NotFound),
        }
    }

    pub async fn update<R>(
        &self,
        id: Uuid,
        owner: Uuid,
        f: impl FnOnce(&mut PlanBuilder) -> R,
    ) -> Result<R, PlanError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(s) if s.owner == owner => {
                s.last_touched = Instant::now();
                Ok(f(&mut s.builder))
            }
            _ => Err(PlanError::NotFound),
        }
    }

    pub async fn discard(&self, id: Uuid, owner: Uuid) -> Result<(), PlanError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(s) if s.owner == owner => {
                sessions.remove(&id);
                info!(plan_id = %id, %owner, "plan session discarded");
                Ok(())
            }
            _ => Err(PlanError::NotFound),
        }
    }

    pub async fn live_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
