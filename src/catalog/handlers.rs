use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::{instrument, warn};

use super::{data, Dosha, FoodItem, MealKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogSlice {
    pub dosha: Dosha,
    pub meal: MealKind,
    pub time: &'static str,
    pub items: &'static [FoodItem],
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/catalog/:dosha/:meal", get(get_catalog_slice))
}

#[instrument]
pub async fn get_catalog_slice(
    Path((dosha, meal)): Path<(String, String)>,
) -> Result<Json<CatalogSlice>, (StatusCode, String)> {
    let dosha: Dosha = dosha.parse().map_err(|e: String| {
        warn!(error = %e, "bad dosha");
        (StatusCode::BAD_REQUEST, e)
    })?;
    let meal: MealKind = meal
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    Ok(Json(CatalogSlice {
        dosha,
        meal,
        time: meal.time_label(),
        items: data::lookup(dosha, meal),
    }))
}
