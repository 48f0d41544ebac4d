use std::fmt;

use serde::Serialize;

use super::builder::{PatientDetails, PlanBuilder};
use super::grid::Weekday;
use crate::catalog::MealKind;

pub const REPORT_TITLE: &str = "Ayurvedic Diet Plan Report";

#[derive(Debug, Serialize)]
pub struct ReportItem {
    pub name: &'static str,
    pub calories: u32,
}

#[derive(Debug, Serialize)]
pub struct ReportMeal {
    pub name: MealKind,
    pub time: &'static str,
    pub items: Vec<ReportItem>,
}

#[derive(Debug, Serialize)]
pub struct ReportDay {
    pub day: Weekday,
    pub meals: Vec<ReportMeal>,
    pub total_calories: u32,
}

/// Read-only snapshot of a plan, ready to print.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub title: &'static str,
    pub prepared_by: String,
    pub patient: PatientDetails,
    pub days: Vec<ReportDay>,
    pub weekly_calories: u32,
}

impl PlanReport {
    pub fn from_builder(builder: &PlanBuilder, prepared_by: &str) -> Self {
        let days: Vec<ReportDay> = builder
            .plan()
            .days
            .iter()
            .map(|d| ReportDay {
                day: d.day,
                meals: d
                    .meals
                    .iter()
                    .map(|m| ReportMeal {
                        name: m.name,
                        time: m.time,
                        items: m
                            .food_items
                            .iter()
                            .map(|f| ReportItem {
                                name: f.name,
                                calories: f.calories,
                            })
                            .collect(),
                    })
                    .collect(),
                total_calories: d.calories(),
            })
            .collect();
        let weekly_calories = days.iter().map(|d| d.total_calories).sum();

        Self {
            title: REPORT_TITLE,
            prepared_by: prepared_by.to_string(),
            patient: builder.patient().clone(),
            days,
            weekly_calories,
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.patient;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Prepared by {}", self.prepared_by)?;
        writeln!(f)?;
        writeln!(f, "Patient Information")?;
        writeln!(f, "  Name: {}", p.name)?;
        writeln!(f, "  Age: {}", p.age)?;
        writeln!(f, "  Weight: {} kg", p.weight)?;
        writeln!(f, "  Dosha: {}", p.dosha)?;
        writeln!(f, "  Water Intake: {}", p.water_intake)?;
        writeln!(f, "  Summary: {}", p.summary.replace('\n', "; "))?;
        writeln!(f)?;
        writeln!(f, "Weekly Diet Timetable")?;
        for day in &self.days {
            writeln!(f, "{} ({} kcal)", day.day, day.total_calories)?;
            for meal in &day.meals {
                write!(f, "  {} ({}): ", meal.name, meal.time)?;
                if meal.items.is_empty() {
                    writeln!(f, "No items")?;
                    continue;
                }
                for (i, item) in meal.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} ({} kcal)", item.name, item.calories)?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f)?;
        write!(f, "Weekly total: {} kcal", self.weekly_calories)
    }
}
