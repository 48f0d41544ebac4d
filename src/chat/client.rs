use std::time::Duration;

use axum::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::dto::{
    ChatMessage, ChatRole, Content, GenerateRequest, GenerateResponse, Part, SystemInstruction,
};
use crate::config::ChatConfig;

pub const SYSTEM_INSTRUCTION: &str = "\
You are Ojas AI, a friendly and supportive chatbot specializing in Ayurveda.
Answer only Ayurveda-related queries (natural remedies, herbs, doshas, wellness guidance).
If the user asks a question unrelated to Ayurveda, politely steer the conversation back.
Keep responses warm, encouraging, and easy to understand.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {0}: {1}")]
    Status(u16, String),
    #[error("received empty text response from model")]
    EmptyReply,
    #[error("all {attempts} attempts failed, last error: {source}")]
    Exhausted {
        attempts: u32,
        source: Box<ChatError>,
    },
}

/// One round-trip to a chat-completion provider. No retries here.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ChatError>;
}

pub fn build_request(conversation: &[ChatMessage]) -> GenerateRequest {
    let contents = conversation
        .iter()
        .map(|m| Content {
            role: match m.role {
                ChatRole::Bot => "model",
                ChatRole::User => "user",
            },
            parts: vec![Part {
                text: m.text.clone(),
            }],
        })
        .collect();
    GenerateRequest {
        contents,
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
    }
}

pub fn extract_text(resp: GenerateResponse) -> Result<String, ChatError> {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(ChatError::EmptyReply)
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(cfg: &ChatConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            endpoint: format!(
                "{}/models/{}:generateContent",
                cfg.base_url.trim_end_matches('/'),
                cfg.model
            ),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ChatError> {
        let body = build_request(conversation);
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::Status(status.as_u16(), text));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = extract_text(parsed)?;
        debug!(chars = text.len(), "chat reply received");
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Plays back queued outcomes; an empty queue keeps failing.
    #[derive(Default)]
    pub struct ScriptedChat {
        outcomes: Mutex<VecDeque<Result<String, ChatError>>>,
        calls: AtomicU32,
    }

    impl ScriptedChat {
        pub fn with(outcomes: Vec<Result<String, ChatError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicU32::new(0),
            }
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(&self, _conversation: &[ChatMessage]) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .expect("scripted chat lock")
                .pop_front()
                .unwrap_or(Err(ChatError::EmptyReply))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_maps_bot_to_model_and_carries_persona() {
        let convo = vec![
            ChatMessage::bot("Namaste!"),
            ChatMessage {
                role: ChatRole::User,
                text: "What calms Vata?".into(),
            },
        ];
        let v = serde_json::to_value(build_request(&convo)).unwrap();
        assert_eq!(v["contents"][0]["role"], "model");
        assert_eq!(v["contents"][1]["role"], "user");
        assert_eq!(v["contents"][1]["parts"][0]["text"], "What calms Vata?");
        let persona = v["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(persona.contains("Ayurveda"));
    }

    #[test]
    fn extracts_first_candidate_text() {
        let resp: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Try warm milk."}, {"text": "x"}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Try warm milk.");
    }

    #[test]
    fn empty_or_missing_text_is_error() {
        let empty: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": ""}]}}]
        }))
        .unwrap();
        assert!(matches!(extract_text(empty), Err(ChatError::EmptyReply)));

        let none: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(extract_text(none), Err(ChatError::EmptyReply)));

        let no_content: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(matches!(extract_text(no_content), Err(ChatError::EmptyReply)));
    }

    #[test]
    fn whitespace_reply_is_passed_through() {
        let blank: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  \n"}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(blank).unwrap(), "  \n");
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(&ChatConfig {
            api_key: "k".into(),
            model: "gemini-test".into(),
            base_url: "https://example.test/v1beta/".into(),
            max_attempts: 5,
            base_delay_ms: 1000,
        })
        .unwrap();
        assert_eq!(
            client.endpoint,
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }
}
