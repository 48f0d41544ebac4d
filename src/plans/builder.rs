use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::grid::{WeeklyPlan, Weekday};
use crate::catalog::{self, Dosha, FoodItem, MealKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("food {food_id} is not offered for {dosha} {meal}")]
    UnknownFood {
        dosha: Dosha,
        meal: MealKind,
        food_id: String,
    },
    #[error("plan not found")]
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDetails {
    pub name: String,
    pub age: u32,
    pub weight: f64,
    pub dosha: Dosha,
    pub water_intake: String,
    pub summary: String,
}

/// Editable plan for one patient: the grid plus picker state.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    patient: PatientDetails,
    plan: WeeklyPlan,
    current_day: Weekday,
    expanded_meal: Option<MealKind>,
}

impl PlanBuilder {
    pub fn new(patient: PatientDetails) -> Self {
        Self {
            patient,
            plan: WeeklyPlan::new(),
            current_day: Weekday::Mon,
            expanded_meal: None,
        }
    }

    pub fn patient(&self) -> &PatientDetails {
        &self.patient
    }

    pub fn plan(&self) -> &WeeklyPlan {
        &self.plan
    }

    pub fn current_day(&self) -> Weekday {
        self.current_day
    }

    pub fn expanded_meal(&self) -> Option<MealKind> {
        self.expanded_meal
    }

    pub fn select_day(&mut self, day: Weekday) {
        self.current_day = day;
    }

    /// Opens the picker for `meal`, or closes it when it is already open.
    pub fn toggle_meal(&mut self, meal: MealKind) -> Option<MealKind> {
        self.expanded_meal = match self.expanded_meal {
            Some(open) if open == meal => None,
            _ => Some(meal),
        };
        self.expanded_meal
    }

    pub fn options(&self, meal: MealKind) -> &'static [FoodItem] {
        catalog::lookup(self.patient.dosha, meal)
    }

    pub fn add_food(
        &mut self,
        meal: MealKind,
        food_id: &str,
    ) -> Result<&'static FoodItem, PlanError> {
        let dosha = self.patient.dosha;
        let item = catalog::find(dosha, meal, food_id).ok_or_else(|| PlanError::UnknownFood {
            dosha,
            meal,
            food_id: food_id.to_string(),
        })?;
        self.plan.add_food(self.current_day, meal, item.clone());
        self.expanded_meal = None;
        debug!(day = %self.current_day, %meal, food_id, "food added");
        Ok(item)
    }

    pub fn remove_food(&mut self, meal: MealKind, food_id: &str) -> usize {
        let removed = self.plan.remove_food(self.current_day, meal, food_id);
        debug!(day = %self.current_day, %meal, food_id, removed, "food removed");
        removed
    }
}

#[cfg(test)]
pub(crate) fn sample_patient(dosha: Dosha) -> PatientDetails {
    PatientDetails {
        name: "Yash Sheorey".into(),
        age: 22,
        weight: 78.0,
        dosha,
        water_intake: "Low".into(),
        summary: "10/19/2023: Detox Cleanse\n10/20/2023: Digestive Boost".into(),
    }
}
