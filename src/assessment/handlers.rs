use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument, warn};

use super::dto::{
    AdjustmentQuery, AssessmentResult, DoshaAdjustments, RequirementsRequest,
    RequirementsResponse, ResultQuery,
};
use super::services::{self, DoshaCard, DOSHA_CARDS};
use crate::state::AppState;

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/assessment/result", get(get_result))
        .route("/assessment/requirements", post(post_requirements))
        .route("/assessment/adjustments", get(get_adjustments))
        .route("/doshas", get(list_doshas))
}

#[instrument]
pub async fn get_result(
    Query(q): Query<ResultQuery>,
) -> Result<Json<AssessmentResult>, (StatusCode, String)> {
    let (vata, pitta, kapha) = q.scores();
    let ranking = services::rank(vata, pitta, kapha);
    let (height_cm, weight_kg) = (q.height_cm(), q.weight_kg());
    if weight_kg <= 0.0 {
        warn!(weight_kg, "non-positive weight");
        return Err((StatusCode::BAD_REQUEST, "weight must be positive".into()));
    }
    let bmi = services::bmi(height_cm, weight_kg).ok_or_else(|| {
        warn!(height_cm, "height out of range");
        (StatusCode::BAD_REQUEST, "height out of range".to_string())
    })?;

    let primary = ranking[0].name;
    let secondary = ranking[1].name;
    debug!(%primary, %secondary, bmi, "assessment computed");

    Ok(Json(AssessmentResult {
        ranking,
        primary,
        secondary,
        description: services::tagline(primary),
        detail: services::detail(primary),
        secondary_detail: services::detail(secondary),
        height_cm,
        weight_kg,
        bmi,
        bmi_scale: services::bmi_scale(bmi),
    }))
}

pub async fn list_doshas() -> Json<&'static [DoshaCard]> {
    let cards: &'static [DoshaCard] = &DOSHA_CARDS;
    Json(cards)
}

#[instrument]
pub async fn post_requirements(
    Json(body): Json<RequirementsRequest>,
) -> Result<Json<RequirementsResponse>, (StatusCode, String)> {
    if !(body.weight.is_finite() && body.weight > 0.0) {
        return Err((StatusCode::BAD_REQUEST, "weight must be positive".into()));
    }
    if !(body.height.is_finite() && body.height > 0.0) {
        return Err((StatusCode::BAD_REQUEST, "height must be positive".into()));
    }

    let activity = body
        .activity
        .map(|a| a.trim().to_ascii_lowercase())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "sedentary".to_string());
    let daily = services::energy_targets(
        body.gender,
        body.age,
        body.weight,
        body.height,
        &activity,
        body.goal,
    );
    Ok(Json(RequirementsResponse {
        portions: services::portions(&daily),
        activity,
        daily,
    }))
}

#[instrument]
pub async fn get_adjustments(
    Query(q): Query<AdjustmentQuery>,
) -> Result<Json<DoshaAdjustments>, (StatusCode, String)> {
    if q.hour > 23 {
        return Err((StatusCode::BAD_REQUEST, "hour must be 0..=23".into()));
    }
    Ok(Json(services::dosha_adjustments(
        q.age,
        q.hour,
        q.season.as_deref(),
    )))
}

#[cfg(test)]
mod tests {
    use super::super::dto::{Gender, Goal};
    use super::*;
    use crate::catalog::Dosha;

    fn query(pairs: &[(&str, &str)]) -> ResultQuery {
        let mut q = ResultQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "vata" => q.vata = v,
                "pitta" => q.pitta = v,
                "kapha" => q.kapha = v,
                "height" => q.height = v,
                "weight" => q.weight = v,
                _ => {}
            }
        }
        q
    }

    #[tokio::test]
    async fn result_uses_defaults_and_ranks() {
        let Json(r) = get_result(Query(query(&[("vata", "20"), ("pitta", "50"), ("kapha", "30")])))
            .await
            .expect("result");
        assert_eq!(r.primary, Dosha::Pitta);
        assert_eq!(r.secondary, Dosha::Kapha);
        assert_eq!(r.description, "This type are sharp thinkers");
        assert_eq!(r.height_cm, 175.0);
        assert_eq!(r.bmi, 22.86);
        assert_eq!(r.bmi_scale, "Healthy Weight");
    }

    #[tokio::test]
    async fn junk_scores_count_as_zero() {
        let Json(r) = get_result(Query(query(&[("vata", "abc"), ("kapha", "5")])))
            .await
            .expect("result");
        assert_eq!(r.primary, Dosha::Kapha);
        assert_eq!(r.secondary, Dosha::Vata);
        assert_eq!(r.ranking[1].value, 0.0);
    }

    #[tokio::test]
    async fn zero_height_is_rejected() {
        let err = get_result(Query(query(&[("height", "0")])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn obese_scale() {
        let Json(r) = get_result(Query(query(&[("height", "160"), ("weight", "90")])))
            .await
            .expect("result");
        assert_eq!(r.bmi, 35.16);
        assert_eq!(r.bmi_scale, "Obese");
    }

    #[tokio::test]
    async fn lists_three_cards() {
        let Json(cards) = list_doshas().await;
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].name, Dosha::Kapha);
    }

    #[tokio::test]
    async fn requirements_default_to_sedentary() {
        let Json(r) = post_requirements(Json(RequirementsRequest {
            age: 30,
            weight: 70.0,
            height: 175.0,
            gender: Gender::Male,
            activity: None,
            goal: Goal::Maintain,
        }))
        .await
        .expect("requirements");
        assert_eq!(r.activity, "sedentary");
        assert!((r.daily.calories - 1648.75 * 1.2).abs() < 1e-6);
        assert!((r.portions.lunch.calories - r.daily.calories * 0.35).abs() < 1e-6);
    }

    #[tokio::test]
    async fn requirements_reject_bad_weight() {
        let err = post_requirements(Json(RequirementsRequest {
            age: 30,
            weight: 0.0,
            height: 175.0,
            gender: Gender::Female,
            activity: Some("moderate".into()),
            goal: Goal::Loss,
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_positive_weight_is_rejected() {
        for weight in ["-70", "0"] {
            let err = get_result(Query(query(&[("weight", weight)])))
                .await
                .unwrap_err();
            assert_eq!(err, (StatusCode::BAD_REQUEST, "weight must be positive".to_string()));
        }
    }

    #[tokio::test]
    async fn tiny_height_is_rejected_not_infinite() {
        let err = get_result(Query(query(&[("height", "1e-200")])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn adjustments_for_evening_in_winter() {
        let Json(a) = get_adjustments(Query(AdjustmentQuery {
            age: 35,
            hour: 19,
            season: Some("winter".into()),
        }))
        .await
        .expect("adjustments");
        assert_eq!(a, DoshaAdjustments { vata: 0, pitta: 1, kapha: 2 });
    }

    #[tokio::test]
    async fn adjustments_reject_bad_hour() {
        let err = get_adjustments(Query(AdjustmentQuery {
            age: 35,
            hour: 24,
            season: None,
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
