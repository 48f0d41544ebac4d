use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod registry;

pub use registry::PatientRegistry;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::dashboard_routes())
}
