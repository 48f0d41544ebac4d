pub mod data;
pub mod handlers;
mod types;

pub use data::{find, lookup};
pub use types::{Dosha, FoodItem, MealKind};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::catalog_routes())
}
