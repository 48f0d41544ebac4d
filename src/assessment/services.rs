use serde::Serialize;

use super::dto::{DoshaAdjustments, EnergyTargets, Gender, Goal, MealPortion, PortionPlan};
use crate::catalog::{Dosha, MealKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoshaScore {
    pub name: Dosha,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct DoshaCard {
    pub name: Dosha,
    pub description: &'static str,
    pub traits: [&'static str; 4],
}

pub static DOSHA_CARDS: [DoshaCard; 3] = [
    DoshaCard {
        name: Dosha::Vata,
        description: "Vata is linked to movement, creativity, and quick thinking. Balanced Vata brings energy, but imbalance can cause anxiety and restlessness.",
        traits: [
            "Energetic & creative",
            "Quick learner",
            "Prone to dry skin",
            "Needs routine & warmth",
        ],
    },
    DoshaCard {
        name: Dosha::Pitta,
        description: "Pitta is linked to metabolism, focus, and digestion. Balanced Pitta makes you confident, but imbalance can cause irritability or overheating.",
        traits: [
            "Strong digestion",
            "Goal-driven",
            "Prone to irritability",
            "Needs cooling foods",
        ],
    },
    DoshaCard {
        name: Dosha::Kapha,
        description: "Kapha is linked to stability, calmness, and endurance. Balanced Kapha brings patience, but imbalance can cause lethargy or weight gain.",
        traits: [
            "Grounded & calm",
            "Strong immunity",
            "Prone to weight gain",
            "Needs stimulation & activity",
        ],
    },
];

pub fn tagline(dosha: Dosha) -> &'static str {
    match dosha {
        Dosha::Vata => "This type is full of energy and creativity",
        Dosha::Pitta => "This type are sharp thinkers",
        Dosha::Kapha => "This type is warm of heart and steady of mind",
    }
}

pub fn detail(dosha: Dosha) -> &'static str {
    match dosha {
        Dosha::Vata => "Vata is formed by the combination of air and space...",
        Dosha::Pitta => "Pitta is formed by the combination of fire and water...",
        Dosha::Kapha => "Kapha is formed by the combination of earth and water...",
    }
}

/// Highest score first. Ties keep Vata, Pitta, Kapha order.
pub fn rank(vata: f64, pitta: f64, kapha: f64) -> [DoshaScore; 3] {
    let mut scores = [
        DoshaScore { name: Dosha::Vata, value: vata },
        DoshaScore { name: Dosha::Pitta, value: pitta },
        DoshaScore { name: Dosha::Kapha, value: kapha },
    ];
    // slice::sort_by is stable
    scores.sort_by(|a, b| b.value.total_cmp(&a.value));
    scores
}

/// Body mass index rounded to two decimals. `None` when height is not
/// positive or so small the result is not finite.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm.is_nan() || height_cm <= 0.0 {
        return None;
    }
    let metres = height_cm / 100.0;
    Some(round_to(weight_kg / (metres * metres), 2)).filter(|b| b.is_finite())
}

pub fn bmi_scale(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Healthy Weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

pub fn activity_factor(activity: &str) -> f64 {
    match activity.trim().to_ascii_lowercase().as_str() {
        "light" => 1.375,
        "moderate" => 1.55,
        "active" => 1.725,
        "athlete" => 1.9,
        _ => 1.2,
    }
}

/// Mifflin-St Jeor resting energy.
pub fn bmr(gender: Gender, age: u32, weight_kg: f64, height_cm: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn energy_targets(
    gender: Gender,
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    activity: &str,
    goal: Goal,
) -> EnergyTargets {
    let tdee = bmr(gender, age, weight_kg, height_cm) * activity_factor(activity);
    let (calories, protein_per_kg) = match goal {
        Goal::Loss => (tdee - 500.0, 2.0),
        Goal::Gain => (tdee + 300.0, 2.2),
        Goal::Maintain => (tdee, 1.5),
    };
    let protein = protein_per_kg * weight_kg;
    let fat = 0.25 * calories / 9.0;
    let carbs = (calories - (protein * 4.0 + fat * 9.0)) / 4.0;
    EnergyTargets {
        calories,
        protein,
        fat,
        carbs,
    }
}

pub fn meal_share(meal: MealKind) -> f64 {
    match meal {
        MealKind::Breakfast => 0.25,
        MealKind::Lunch => 0.35,
        MealKind::Dinner => 0.40,
    }
}

pub fn portions(targets: &EnergyTargets) -> PortionPlan {
    let split = |meal| {
        let share = meal_share(meal);
        MealPortion {
            meal,
            calories: targets.calories * share,
            protein: targets.protein * share,
            fat: targets.fat * share,
            carbs: targets.carbs * share,
        }
    };
    PortionPlan {
        breakfast: split(MealKind::Breakfast),
        lunch: split(MealKind::Lunch),
        dinner: split(MealKind::Dinner),
    }
}

/// Age band, hour of day and season each push one dosha up by one.
pub fn dosha_adjustments(age: u32, hour: u8, season: Option<&str>) -> DoshaAdjustments {
    let mut adj = DoshaAdjustments::default();

    match age {
        0..=29 => adj.kapha += 1,
        30..=59 => adj.pitta += 1,
        _ => adj.vata += 1,
    }

    // Pitta's night window wraps past midnight
    match hour {
        6..=9 | 18..=21 => adj.kapha += 1,
        10..=13 | 22..=23 | 0..=1 => adj.pitta += 1,
        _ => adj.vata += 1,
    }

    let season = season.map(|s| s.trim().to_ascii_lowercase().replace([' ', '-'], "_"));
    match season.as_deref() {
        Some("summer") => adj.pitta += 1,
        Some("winter") => adj.kapha += 1,
        Some("autumn") | Some("late_summer") => adj.vata += 1,
        _ => {}
    }
    adj
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
