use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::builder::PlanError;
use super::dto::{
    AddFoodRequest, BuilderView, CreatePlanRequest, RemovedResponse, SelectDayRequest,
};
use super::report::PlanReport;
use crate::{auth::services::AuthUser, catalog::MealKind, state::AppState};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", post(create_plan))
        .route("/plans/:id", get(get_plan).delete(discard_plan))
        .route("/plans/:id/day", put(select_day))
}

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/:id/meals/:meal/toggle", post(toggle_meal))
        .route("/plans/:id/meals/:meal/foods", post(add_food))
        .route("/plans/:id/meals/:meal/foods/:food_id", delete(remove_food))
}

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/:id/report", get(get_report))
        .route("/plans/:id/report.txt", get(get_report_text))
}

type HandlerError = (StatusCode, String);

#[instrument(skip(state, body))]
pub async fn create_plan(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Json(body): Json<CreatePlanRequest>,
) -> Result<(StatusCode, HeaderMap, Json<BuilderView>), HandlerError> {
    if body.patient.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "patient name is required".into()));
    }
    let id = state.plans.create(user_id, body.patient).await;
    let view = state
        .plans
        .read(id, user_id, |b| BuilderView::new(id, b))
        .await
        .map_err(plan_error)?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/plans/{}", id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(view)))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BuilderView>, HandlerError> {
    state
        .plans
        .read(id, user_id, |b| BuilderView::new(id, b))
        .await
        .map(Json)
        .map_err(plan_error)
}

#[instrument(skip(state))]
pub async fn discard_plan(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    state.plans.discard(id, user_id).await.map_err(plan_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn select_day(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectDayRequest>,
) -> Result<Json<BuilderView>, HandlerError> {
    state
        .plans
        .update(id, user_id, |b| {
            b.select_day(body.day);
            BuilderView::new(id, b)
        })
        .await
        .map(Json)
        .map_err(plan_error)
}

#[instrument(skip(state))]
pub async fn toggle_meal(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path((id, meal)): Path<(Uuid, String)>,
) -> Result<Json<BuilderView>, HandlerError> {
    let meal = parse_meal(&meal)?;
    state
        .plans
        .update(id, user_id, |b| {
            b.toggle_meal(meal);
            BuilderView::new(id, b)
        })
        .await
        .map(Json)
        .map_err(plan_error)
}

#[instrument(skip(state))]
pub async fn add_food(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path((id, meal)): Path<(Uuid, String)>,
    Json(body): Json<AddFoodRequest>,
) -> Result<Json<BuilderView>, HandlerError> {
    let meal = parse_meal(&meal)?;
    let view = state
        .plans
        .update(id, user_id, |b| {
            b.add_food(meal, &body.food_id)
                .map(|_| BuilderView::new(id, b))
        })
        .await
        .and_then(|r| r)
        .map_err(plan_error)?;
    info!(plan_id = %id, %meal, food_id = %body.food_id, "food added to plan");
    Ok(Json(view))
}

#[instrument(skip(state))]
pub async fn remove_food(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path((id, meal, food_id)): Path<(Uuid, String, String)>,
) -> Result<Json<RemovedResponse>, HandlerError> {
    let meal = parse_meal(&meal)?;
    state
        .plans
        .update(id, user_id, |b| {
            let removed = b.remove_food(meal, &food_id);
            RemovedResponse {
                removed,
                view: BuilderView::new(id, b),
            }
        })
        .await
        .map(Json)
        .map_err(plan_error)
}

#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanReport>, HandlerError> {
    let doctor = state.config.doctor_name.clone();
    state
        .plans
        .read(id, user_id, |b| PlanReport::from_builder(b, &doctor))
        .await
        .map(Json)
        .map_err(plan_error)
}

#[instrument(skip(state))]
pub async fn get_report_text(
    State(state): State<AppState>,
    AuthUser(user_id, _): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<([(header::HeaderName, &'static str); 1], String), HandlerError> {
    let doctor = state.config.doctor_name.clone();
    let text = state
        .plans
        .read(id, user_id, |b| PlanReport::from_builder(b, &doctor).render_text())
        .await
        .map_err(plan_error)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

fn parse_meal(raw: &str) -> Result<MealKind, HandlerError> {
    raw.parse().map_err(|e: String| (StatusCode::BAD_REQUEST, e))
}

fn plan_error(e: PlanError) -> HandlerError {
    match e {
        PlanError::NotFound => (StatusCode::NOT_FOUND, "Plan not found".into()),
        PlanError::UnknownFood { .. } => {
            warn!(error = %e, "rejected food");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}
