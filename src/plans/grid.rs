use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{FoodItem, MealKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown day: {}", s))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub name: MealKind,
    pub time: &'static str,
    /// Insertion order is display order; duplicates allowed.
    pub food_items: Vec<FoodItem>,
}

impl Meal {
    fn empty(name: MealKind) -> Self {
        Self {
            name,
            time: name.time_label(),
            food_items: Vec::new(),
        }
    }

    pub fn calories(&self) -> u32 {
        self.food_items.iter().map(|f| f.calories).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub meals: [Meal; 3],
}

impl DayPlan {
    fn empty(day: Weekday) -> Self {
        Self {
            day,
            meals: MealKind::ALL.map(Meal::empty),
        }
    }

    pub fn meal(&self, kind: MealKind) -> &Meal {
        &self.meals[kind.index()]
    }

    pub fn calories(&self) -> u32 {
        self.meals.iter().map(Meal::calories).sum()
    }
}

/// Seven days by three meals of assigned foods.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPlan {
    pub days: [DayPlan; 7],
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self {
            days: Weekday::ALL.map(DayPlan::empty),
        }
    }

    pub fn day(&self, day: Weekday) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn meal(&self, day: Weekday, kind: MealKind) -> &Meal {
        self.day(day).meal(kind)
    }

    fn meal_mut(&mut self, day: Weekday, kind: MealKind) -> &mut Meal {
        &mut self.days[day.index()].meals[kind.index()]
    }

    pub fn add_food(&mut self, day: Weekday, kind: MealKind, item: FoodItem) {
        self.meal_mut(day, kind).food_items.push(item);
    }

    /// Drops every entry with `food_id`; returns how many went.
    pub fn remove_food(&mut self, day: Weekday, kind: MealKind, food_id: &str) -> usize {
        let items = &mut self.meal_mut(day, kind).food_items;
        let before = items.len();
        items.retain(|f| f.id != food_id);
        before - items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days
            .iter()
            .flat_map(|d| d.meals.iter())
            .all(|m| m.food_items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{lookup, Dosha};

    fn item(n: usize) -> FoodItem {
        lookup(Dosha::Vata, MealKind::Breakfast)[n].clone()
    }

    #[test]
    fn new_plan_is_seven_by_three_and_empty() {
        let plan = WeeklyPlan::new();
        assert_eq!(plan.days.len(), 7);
        for (i, d) in plan.days.iter().enumerate() {
            assert_eq!(d.day, Weekday::ALL[i]);
            let names: Vec<MealKind> = d.meals.iter().map(|m| m.name).collect();
            assert_eq!(names, MealKind::ALL.to_vec());
            assert!(d.meals.iter().all(|m| m.food_items.is_empty()));
        }
        assert!(plan.is_empty());
    }

    #[test]
    fn add_then_remove_restores_meal() {
        let mut plan = WeeklyPlan::new();
        plan.add_food(Weekday::Mon, MealKind::Breakfast, item(0));
        let before: Vec<&str> = plan
            .meal(Weekday::Mon, MealKind::Breakfast)
            .food_items
            .iter()
            .map(|f| f.id)
            .collect();

        plan.add_food(Weekday::Mon, MealKind::Breakfast, item(3));
        assert_eq!(plan.remove_food(Weekday::Mon, MealKind::Breakfast, "v4"), 1);

        let after: Vec<&str> = plan
            .meal(Weekday::Mon, MealKind::Breakfast)
            .food_items
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn duplicates_are_kept_and_removed_together() {
        let mut plan = WeeklyPlan::new();
        plan.add_food(Weekday::Fri, MealKind::Breakfast, item(1));
        plan.add_food(Weekday::Fri, MealKind::Breakfast, item(2));
        plan.add_food(Weekday::Fri, MealKind::Breakfast, item(1));
        assert_eq!(plan.meal(Weekday::Fri, MealKind::Breakfast).food_items.len(), 3);

        assert_eq!(plan.remove_food(Weekday::Fri, MealKind::Breakfast, "v2"), 2);
        let meal = plan.meal(Weekday::Fri, MealKind::Breakfast);
        assert_eq!(meal.food_items.len(), 1);
        assert_eq!(meal.food_items[0].id, "v3");
    }

    #[test]
    fn adding_to_one_day_leaves_others_alone() {
        let mut plan = WeeklyPlan::new();
        plan.add_food(Weekday::ALL[2], MealKind::Breakfast, item(0));
        for (i, d) in plan.days.iter().enumerate() {
            let total: usize = d.meals.iter().map(|m| m.food_items.len()).sum();
            assert_eq!(total, usize::from(i == 2));
        }
    }

    #[test]
    fn removing_absent_id_is_noop() {
        let mut plan = WeeklyPlan::new();
        plan.add_food(Weekday::Tue, MealKind::Breakfast, item(4));
        assert_eq!(plan.remove_food(Weekday::Tue, MealKind::Breakfast, "nope"), 0);
        let meal = plan.meal(Weekday::Tue, MealKind::Breakfast);
        assert_eq!(meal.food_items.len(), 1);
        assert_eq!(meal.food_items[0].id, "v5");
    }

    #[test]
    fn calories_sum_per_day() {
        let mut plan = WeeklyPlan::new();
        plan.add_food(Weekday::Sun, MealKind::Breakfast, item(0)); // 280
        plan.add_food(Weekday::Sun, MealKind::Breakfast, item(1)); // 60
        assert_eq!(plan.day(Weekday::Sun).calories(), 340);
        assert_eq!(plan.day(Weekday::Sat).calories(), 0);
    }

    #[test]
    fn weekday_parses_and_indexes() {
        assert_eq!("wed".parse::<Weekday>().unwrap(), Weekday::Wed);
        assert_eq!(Weekday::Sun.index(), 6);
        assert!("Someday".parse::<Weekday>().is_err());
    }
}
