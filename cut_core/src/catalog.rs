//! Built-in reference data: the weekly training schedule, starter food
//! library, fixed breakfast template, and default profile.
//!
//! The weekly schedule is configuration, not user data; day-type
//! classification depends on it being reproduced exactly.

use crate::types::*;
use chrono::{NaiveDate, Weekday};
use once_cell::sync::Lazy;

/// Cached starter food library - built once and reused
static SEED_FOODS: Lazy<Vec<FoodItem>> = Lazy::new(build_seed_foods);

/// Cached fixed breakfast template
static BREAKFAST_TEMPLATE: Lazy<MealTemplate> = Lazy::new(build_breakfast_template);

/// Expected training types for each weekday
///
/// The union of this list with the training actually logged on a date
/// drives day-type classification.
pub fn scheduled_training(weekday: Weekday) -> &'static [TrainingType] {
    match weekday {
        Weekday::Mon => &[TrainingType::Hybrid],
        Weekday::Tue => &[TrainingType::Pilates, TrainingType::RunZ2],
        Weekday::Wed => &[TrainingType::Hybrid],
        Weekday::Thu => &[TrainingType::RunZ2],
        Weekday::Fri => &[TrainingType::Hybrid, TrainingType::RunZ2],
        Weekday::Sat => &[TrainingType::Walk],
        Weekday::Sun => &[TrainingType::Rest],
    }
}

/// Get a reference to the cached starter food library
pub fn seed_foods() -> &'static [FoodItem] {
    &SEED_FOODS
}

/// Get a reference to the cached breakfast template
pub fn breakfast_template() -> &'static MealTemplate {
    &BREAKFAST_TEMPLATE
}

/// The default user profile, used on first launch and after a reset
pub fn default_profile() -> UserProfile {
    UserProfile {
        name: "Delfi".into(),
        age: 28,
        height_cm: 169.0,
        weight_kg: 60.0,
        start_date: NaiveDate::from_ymd_opt(2026, 2, 25).expect("valid date"),
        goal_date: NaiveDate::from_ymd_opt(2026, 4, 13).expect("valid date"),
        goal_fat_loss_kg: 2.0,
        protein_target_g: 120,
        calorie_targets: CalorieTargets {
            hybrid: 1900,
            running: 1800,
            pilates: 1800,
            rest: 1700,
        },
        maintenance_tdee: 2150,
        count_exercise_calories: false,
        breakfast_template: Some(breakfast_template().clone()),
    }
}

/// A fresh application state seeded with defaults
pub fn seeded_state() -> AppState {
    AppState {
        profile: default_profile(),
        logs: Default::default(),
        foods: seed_foods().to_vec(),
        templates: vec![breakfast_template().clone()],
    }
}

fn food(
    id: &str,
    name: &str,
    serving_grams: f64,
    calories: i32,
    protein: f64,
    carbs: f64,
    fat: f64,
    category: &str,
) -> FoodItem {
    FoodItem {
        id: id.into(),
        name: name.into(),
        serving_grams,
        calories,
        macros: Macros {
            protein,
            carbs,
            fat,
        },
        category: Some(category.into()),
    }
}

fn build_seed_foods() -> Vec<FoodItem> {
    vec![
        food("f1", "Chicken breast (cooked)", 100.0, 165, 31.0, 0.0, 3.6, "Protein"),
        food("f2", "Salmon fillet", 100.0, 208, 20.0, 0.0, 13.0, "Protein"),
        food("f3", "Eggs (1 large)", 50.0, 72, 6.3, 0.4, 5.0, "Protein"),
        food("f4", "Greek yogurt (0% fat)", 100.0, 59, 10.0, 3.6, 0.4, "Protein"),
        food("f5", "Cottage cheese", 100.0, 98, 11.0, 3.4, 4.3, "Protein"),
        food("f6", "White rice (cooked)", 100.0, 130, 2.7, 28.0, 0.3, "Carbs"),
        food("f7", "Oats (dry)", 40.0, 154, 5.4, 27.0, 2.8, "Carbs"),
        food("f8", "Sweet potato (baked)", 100.0, 90, 2.0, 21.0, 0.1, "Carbs"),
        food("f9", "Pasta (cooked)", 100.0, 157, 5.8, 31.0, 0.9, "Carbs"),
        food("f10", "Avocado", 50.0, 80, 1.0, 4.3, 7.3, "Fats"),
        food("f11", "Olive oil (1 tbsp)", 14.0, 119, 0.0, 0.0, 13.5, "Fats"),
        food("f12", "Almonds", 30.0, 174, 6.0, 5.4, 15.0, "Fats"),
        food("f13", "Banana (medium)", 120.0, 107, 1.3, 27.0, 0.4, "Fruit"),
        food("f14", "Apple (medium)", 150.0, 78, 0.4, 21.0, 0.3, "Fruit"),
        food("f15", "Broccoli", 100.0, 34, 2.8, 7.0, 0.4, "Veg"),
        food("f16", "Spinach", 100.0, 23, 2.9, 3.6, 0.4, "Veg"),
        food("f17", "Whey protein (1 scoop)", 30.0, 120, 24.0, 3.0, 1.5, "Protein"),
        food("f18", "Protein bar", 60.0, 220, 20.0, 24.0, 7.0, "Protein"),
        food("f19", "Skim milk (100ml)", 100.0, 35, 3.5, 5.0, 0.1, "Dairy"),
        food("f20", "Sourdough bread (1 slice)", 50.0, 120, 4.0, 24.0, 1.0, "Carbs"),
    ]
}

fn item(name: &str, grams: f64, calories: i32, protein: f64, carbs: f64, fat: f64) -> TemplateItem {
    TemplateItem {
        food_item_id: None,
        name: name.into(),
        grams,
        calories,
        macros: Macros {
            protein,
            carbs,
            fat,
        },
    }
}

fn build_breakfast_template() -> MealTemplate {
    MealTemplate {
        id: "breakfast-fixed".into(),
        name: "Fixed Breakfast".into(),
        items: vec![
            item("Chia seeds", 16.0, 77, 2.6, 5.3, 4.9),
            item("Whey protein (1 scoop)", 30.0, 120, 24.0, 3.0, 1.5),
            item("Skim milk", 60.0, 21, 2.1, 3.0, 0.1),
            item("Banana", 30.0, 27, 0.4, 6.9, 0.1),
            item("Blueberries", 20.0, 11, 0.1, 2.7, 0.1),
            item("Apple", 40.0, 21, 0.1, 5.5, 0.1),
            item("Granola", 15.0, 67, 1.5, 10.5, 2.1),
        ],
    }
}
