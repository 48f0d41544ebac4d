use super::types::{Dosha, FoodItem, MealKind};

const VATA: &str = "Vata-Pacifying";
const PITTA: &str = "Pitta-Pacifying";

const fn food(
    id: &'static str,
    name: &'static str,
    calories: u32,
    ayurvedic_properties: &'static str,
) -> FoodItem {
    FoodItem {
        id,
        name,
        calories,
        ayurvedic_properties,
    }
}

static VATA_BREAKFAST: [FoodItem; 7] = [
    food("v1", "Warm Oats", 280, VATA),
    food("v2", "Dates", 60, VATA),
    food("v3", "Moong Dal Khichdi", 250, VATA),
    food("v4", "Ghee with Roti", 200, VATA),
    food("v5", "Almond Milk", 100, VATA),
    food("v6", "Rice Porridge", 220, VATA),
    food("v7", "Banana", 90, VATA),
];

static VATA_LUNCH: [FoodItem; 7] = [
    food("v8", "Vegetable Khichdi", 350, VATA),
    food("v9", "Rice", 130, VATA),
    food("v10", "Steamed Greens", 80, VATA),
    food("v11", "Paneer Curry", 250, VATA),
    food("v12", "Pumpkin Sabji", 150, VATA),
    food("v13", "Cumin Rice", 180, VATA),
    food("v14", "Lentil Dal", 200, VATA),
];

static VATA_DINNER: [FoodItem; 7] = [
    food("v15", "Vegetable Soup", 200, VATA),
    food("v16", "Sweet Potato", 150, VATA),
    food("v17", "Ghee Rice", 180, VATA),
    food("v18", "Carrot Soup", 120, VATA),
    food("v19", "Spinach Curry", 160, VATA),
    food("v20", "Daliya", 140, VATA),
    food("v21", "Beetroot Curry", 170, VATA),
];

static PITTA_BREAKFAST: [FoodItem; 7] = [
    food("p1", "Sweet Potatoes", 180, PITTA),
    food("p2", "Coconut Water", 45, PITTA),
    food("p3", "Dates", 60, PITTA),
    food("p4", "Fruit Salad", 200, PITTA),
    food("p5", "Rice Porridge", 220, PITTA),
    food("p6", "Cucumber Juice", 40, PITTA),
    food("p7", "Melon", 70, PITTA),
];

static PITTA_LUNCH: [FoodItem; 7] = [
    food("p8", "Leafy Veggies", 50, PITTA),
    food("p9", "Rice", 130, PITTA),
    food("p10", "Curd", 100, PITTA),
    food("p11", "Quinoa Bowl", 250, PITTA),
    food("p12", "Bottle Gourd Curry", 180, PITTA),
    food("p13", "Mint Rice", 200, PITTA),
    food("p14", "Lassi", 90, PITTA),
];

static PITTA_DINNER: [FoodItem; 7] = [
    food("p15", "Mushrooms", 60, PITTA),
    food("p16", "Moong Dal", 150, PITTA),
    food("p17", "Peas", 75, PITTA),
    food("p18", "Lauki Curry", 120, PITTA),
    food("p19", "Pumpkin Soup", 130, PITTA),
    food("p20", "Steamed Beans", 100, PITTA),
    food("p21", "Apple Smoothie", 140, PITTA),
];
/// Foods offered for a dosha and meal slot, in display order.
///
/// Kapha has no seeded entry; it yields nothing selectable.
pub fn lookup(dosha: Dosha, meal: MealKind) -> &'static [FoodItem] {
    match (dosha, meal) {
        (Dosha::Vata, MealKind::Breakfast) => &VATA_BREAKFAST,
        (Dosha::Vata, MealKind::Lunch) => &VATA_LUNCH,
        (Dosha::Vata, MealKind::Dinner) => &VATA_DINNER,
        (Dosha::Pitta, MealKind::Breakfast) => &PITTA_BREAKFAST,
        (Dosha::Pitta, MealKind::Lunch) => &PITTA_LUNCH,
        (Dosha::Pitta, MealKind::Dinner) => &PITTA_DINNER,
        (Dosha::Kapha, _) => &[],
    }
}

pub fn find(dosha: Dosha, meal: MealKind, id: &str) -> Option<&'static FoodItem> {
    lookup(dosha, meal).iter().find(|f| f.id == id)
}
