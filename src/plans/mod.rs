pub mod builder;
mod dto;
pub mod grid;
pub mod handlers;
pub mod report;
pub mod store;

pub use store::PlanStore;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::session_routes())
        .merge(handlers::meal_routes())
        .merge(handlers::report_routes())
}
