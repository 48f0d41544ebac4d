use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::client::ChatError;
use super::dto::{ChatMessage, ChatReply, ChatRequest, ChatRole};
use super::retry::{with_backoff, RetryPolicy};
use crate::state::AppState;

pub const GREETING: &str =
    "🌿 Namaste! I'm Ojas AI, your Ayurveda assistant. How can I help you today?";
pub const FALLBACK_REPLY: &str = "⚠️ Sorry, I couldn't process that right now due to a network or API issue. Please try again.";

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(send_message))
        .route("/chat/greeting", get(greeting))
}

pub async fn greeting() -> Json<ChatMessage> {
    Json(ChatMessage::bot(GREETING))
}

#[instrument(skip(state, body), fields(messages = body.messages.len()))]
pub async fn send_message(
    State(state): State<AppState>,
    Json(mut body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    match body.messages.last_mut() {
        Some(last) if last.role == ChatRole::User && !last.text.trim().is_empty() => {
            last.text = last.text.trim().to_string();
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "last message must be a non-empty user message".into(),
            ))
        }
    }

    let policy = RetryPolicy::from(&state.config.chat);
    let client = state.chat.clone();
    let conversation = body.messages;
    let outcome: Result<String, ChatError> =
        with_backoff(&policy, |_| client.complete(&conversation)).await;

    match outcome {
        Ok(text) => {
            info!(chars = text.len(), "chat reply sent");
            Ok(Json(ChatReply {
                reply: ChatMessage::bot(text),
            }))
        }
        Err(e) => {
            error!(error = %e, "chat proxy gave up");
            Err((StatusCode::BAD_GATEWAY, FALLBACK_REPLY.into()))
        }
    }
}
