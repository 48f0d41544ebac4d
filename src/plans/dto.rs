use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::builder::{PatientDetails, PlanBuilder};
use super::grid::{WeeklyPlan, Weekday};
use crate::catalog::{FoodItem, MealKind};

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub patient: PatientDetails,
}

#[derive(Debug, Deserialize)]
pub struct SelectDayRequest {
    pub day: Weekday,
}

#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub food_id: String,
}

/// What the builder screen renders.
#[derive(Debug, Serialize)]
pub struct BuilderView {
    pub id: Uuid,
    pub patient: PatientDetails,
    pub current_day: Weekday,
    pub expanded_meal: Option<MealKind>,
    /// Catalog slice for the expanded meal; absent when the picker is closed.
    pub options: Option<&'static [FoodItem]>,
    pub plan: WeeklyPlan,
}

impl BuilderView {
    pub fn new(id: Uuid, b: &PlanBuilder) -> Self {
        Self {
            id,
            patient: b.patient().clone(),
            current_day: b.current_day(),
            expanded_meal: b.expanded_meal(),
            options: b.expanded_meal().map(|m| b.options(m)),
            plan: b.plan().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
    pub view: BuilderView,
}
