use serde::{Deserialize, Serialize};

use super::services::DoshaScore;
use crate::catalog::{Dosha, MealKind};

pub const DEFAULT_HEIGHT_CM: f64 = 175.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Quiz scores arrive as loose query strings.
#[derive(Debug, Default, Deserialize)]
pub struct ResultQuery {
    pub vata: Option<String>,
    pub pitta: Option<String>,
    pub kapha: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}

fn number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl ResultQuery {
    pub fn scores(&self) -> (f64, f64, f64) {
        let score = |raw: &Option<String>| number(raw.as_deref()).unwrap_or(0.0);
        (score(&self.vata), score(&self.pitta), score(&self.kapha))
    }

    pub fn height_cm(&self) -> f64 {
        number(self.height.as_deref()).unwrap_or(DEFAULT_HEIGHT_CM)
    }

    pub fn weight_kg(&self) -> f64 {
        number(self.weight.as_deref()).unwrap_or(DEFAULT_WEIGHT_KG)
    }
}

#[derive(Debug, Serialize)]
pub struct AssessmentResult {
    pub ranking: [DoshaScore; 3],
    pub primary: Dosha,
    pub secondary: Dosha,
    pub description: &'static str,
    pub detail: &'static str,
    pub secondary_detail: &'static str,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmi_scale: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Loss,
    Gain,
    #[default]
    Maintain,
}

#[derive(Debug, Deserialize)]
pub struct RequirementsRequest {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub gender: Gender,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub goal: Goal,
}

/// Daily targets: kcal and grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyTargets {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealPortion {
    pub meal: MealKind,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortionPlan {
    pub breakfast: MealPortion,
    pub lunch: MealPortion,
    pub dinner: MealPortion,
}

#[derive(Debug, Serialize)]
pub struct RequirementsResponse {
    pub activity: String,
    pub daily: EnergyTargets,
    pub portions: PortionPlan,
}

#[derive(Debug, Deserialize)]
pub struct AdjustmentQuery {
    pub age: u32,
    /// Local hour, 0..=23.
    pub hour: u8,
    pub season: Option<String>,
}

/// Points added to each dosha for the current life stage, hour and season.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoshaAdjustments {
    pub vata: u8,
    pub pitta: u8,
    pub kapha: u8,
}
