pub mod client;
mod dto;
pub mod handlers;
pub mod retry;

pub use client::{ChatClient, GeminiClient};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::chat_routes())
}
