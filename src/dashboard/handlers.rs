use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use super::dto::{AddPatientRequest, PatientList, PatientQuery};
use super::registry::{NewPatient, Patient, Totals};
use crate::{auth::services::AuthUser, state::AppState};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/patients", get(list_patients).post(add_patient))
        .route("/dashboard/summary", get(summary))
}

#[instrument(skip(state))]
pub async fn list_patients(
    State(state): State<AppState>,
    user: AuthUser,
    Query(q): Query<PatientQuery>,
) -> Result<Json<PatientList>, (StatusCode, String)> {
    user.require_staff()?;
    let filter = q.into_filter().map_err(|e| {
        warn!(error = %e, "bad patient filter");
        (StatusCode::BAD_REQUEST, e)
    })?;
    let patients = state.patients.list(&filter).await;
    Ok(Json(PatientList {
        count: patients.len(),
        patients,
    }))
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Totals>, (StatusCode, String)> {
    user.require_staff()?;
    Ok(Json(state.patients.totals().await))
}

#[instrument(skip(state, body))]
pub async fn add_patient(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<AddPatientRequest>,
) -> Result<(StatusCode, Json<Patient>), (StatusCode, String)> {
    user.require_staff()?;
    state
        .patients
        .add(NewPatient {
            name: body.name,
            dosha: body.dosha,
            status: body.status,
            age: body.age,
            sex: body.sex,
        })
        .await
        .map(|p| (StatusCode::CREATED, Json(p)))
        .ok_or((StatusCode::BAD_REQUEST, "patient name is required".to_string()))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::auth::Role;
    use crate::dashboard::registry::{PatientDosha, PatientStatus, Sex};

    fn staff() -> AuthUser {
        AuthUser(Uuid::new_v4(), Role::Doctor)
    }

    fn filter(q: &str, dosha: &str, status: &str) -> PatientQuery {
        PatientQuery {
            q: Some(q.into()),
            dosha: Some(dosha.into()),
            status: Some(status.into()),
        }
    }

    #[tokio::test]
    async fn lists_with_filters() {
        let state = AppState::fake();
        let Json(all) = list_patients(State(state.clone()), staff(), Query(filter("", "", "")))
            .await
            .expect("list");
        assert_eq!(all.count, 5);

        let Json(pitta) = list_patients(
            State(state),
            staff(),
            Query(filter("", "Pitta", "Completed")),
        )
        .await
        .expect("list");
        assert_eq!(pitta.count, 1);
        assert_eq!(pitta.patients[0].name, "Yash");
    }

    #[tokio::test]
    async fn unknown_filter_value_is_bad_request() {
        let err = list_patients(
            State(AppState::fake()),
            staff(),
            Query(filter("", "Ether", "")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patients_are_forbidden() {
        let patient = AuthUser(Uuid::new_v4(), Role::Patient);
        let err = summary(State(AppState::fake()), patient).await.unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn add_then_summarise() {
        let state = AppState::fake();
        let admin = AuthUser(Uuid::new_v4(), Role::Admin);
        let (status, Json(p)) = add_patient(
            State(state.clone()),
            admin,
            Json(AddPatientRequest {
                name: " Kavya ".into(),
                dosha: PatientDosha::Kapha,
                status: PatientStatus::OnPlan,
                age: Some(29),
                sex: Sex::F,
            }),
        )
        .await
        .expect("add");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(p.id, "p6");

        let Json(totals) = summary(State(state), admin).await.expect("summary");
        assert_eq!(totals.total_patients, 6);
        assert_eq!(totals.active_plans, 3);
        assert_eq!(totals.alerts, 2);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let err = add_patient(
            State(AppState::fake()),
            staff(),
            Json(AddPatientRequest {
                name: "  ".into(),
                dosha: PatientDosha::Mixed,
                status: PatientStatus::New,
                age: None,
                sex: Sex::O,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
