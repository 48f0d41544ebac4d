use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ayurvedic body constitution used as the catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dosha {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dosha::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dosha: {}", s))
    }
}

/// One of the three daily meal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    pub const ALL: [MealKind; 3] = [MealKind::Breakfast, MealKind::Lunch, MealKind::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
        }
    }

    pub fn time_label(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "7:00 AM",
            MealKind::Lunch => "1:00 PM",
            MealKind::Dinner => "8:00 PM",
        }
    }

    /// Position of the slot inside a day.
    pub fn index(&self) -> usize {
        match self {
            MealKind::Breakfast => 0,
            MealKind::Lunch => 1,
            MealKind::Dinner => 2,
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealKind::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown meal: {}", s))
    }
}

/// Catalog entry. Reference data, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodItem {
    pub id: &'static str,
    pub name: &'static str,
    pub calories: u32,
    pub ayurvedic_properties: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("vata".parse::<Dosha>().unwrap(), Dosha::Vata);
        assert_eq!(" PITTA ".parse::<Dosha>().unwrap(), Dosha::Pitta);
        assert_eq!("dinner".parse::<MealKind>().unwrap(), MealKind::Dinner);
        assert!("mixed".parse::<Dosha>().is_err());
        assert!("brunch".parse::<MealKind>().is_err());
    }

    #[test]
    fn meal_slots_keep_day_order() {
        let idx: Vec<usize> = MealKind::ALL.iter().map(|m| m.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(MealKind::Lunch.time_label(), "1:00 PM");
    }
}
