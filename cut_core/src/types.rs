//! Core domain types for the Cutt calorie tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The user profile and per-day-type calorie targets
//! - Day logs (meals, training, body metrics)
//! - Food library items and meal templates
//! - The complete persisted application state
//!
//! Persisted types serialize with camelCase field names so that exported
//! JSON round-trips with earlier exports of the same data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Macros and Profile Types
// ============================================================================

/// Macronutrient amounts in grams
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Integer kcal target for each of the four day types
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalorieTargets {
    pub hybrid: i32,
    pub running: i32,
    pub pilates: i32,
    pub rest: i32,
}

impl CalorieTargets {
    /// Look up the target for a day type (total, all four keys exist)
    pub fn get(&self, day_type: DayType) -> i32 {
        match day_type {
            DayType::Hybrid => self.hybrid,
            DayType::Running => self.running,
            DayType::Pilates => self.pilates,
            DayType::Rest => self.rest,
        }
    }
}

/// The single user's profile and goal settings
///
/// Identity fields (name, age, height, starting weight) are informational
/// only and never enter any calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub start_date: NaiveDate,
    pub goal_date: NaiveDate,
    pub goal_fat_loss_kg: f64,
    pub protein_target_g: i32,
    pub calorie_targets: CalorieTargets,
    pub maintenance_tdee: i32,
    pub count_exercise_calories: bool,
    #[serde(default)]
    pub breakfast_template: Option<MealTemplate>,
}

// ============================================================================
// Day Classification Types
// ============================================================================

/// Training session type as logged by the user
///
/// Explicit variants (rather than free text) so day classification can
/// match exhaustively.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainingType {
    Hybrid,
    Pilates,
    #[serde(rename = "Run Z2")]
    RunZ2,
    Run,
    Strength,
    Walk,
    Rest,
}

impl TrainingType {
    /// All known variants, for CLI help and parsing
    pub const ALL: [TrainingType; 7] = [
        TrainingType::Hybrid,
        TrainingType::Pilates,
        TrainingType::RunZ2,
        TrainingType::Run,
        TrainingType::Strength,
        TrainingType::Walk,
        TrainingType::Rest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrainingType::Hybrid => "Hybrid",
            TrainingType::Pilates => "Pilates",
            TrainingType::RunZ2 => "Run Z2",
            TrainingType::Run => "Run",
            TrainingType::Strength => "Strength",
            TrainingType::Walk => "Walk",
            TrainingType::Rest => "Rest",
        }
    }
}

/// Derived classification of a calendar day
///
/// Never stored, except as an explicit per-day override in `DayMetrics`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Hybrid,
    Running,
    Pilates,
    Rest,
}

// ============================================================================
// Day Log Types
// ============================================================================

/// A single logged meal
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: Uuid,
    /// Wall-clock time of the meal, "HH:MM"
    pub time: String,
    pub name: String,
    pub calories: i32,
    pub macros: Macros,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single logged training session
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    pub duration_min: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Rate of perceived exertion, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Daily body metrics, all optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Mood rating, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    /// Manual day-type override; always wins over schedule inference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type_override: Option<DayType>,
}

/// Everything logged for one calendar date
///
/// Created lazily: an absent date behaves as an empty log and is never
/// materialized until the first write. A log with zero meals counts as
/// "not logged" for deficit, streak, and average purposes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: Vec<MealEntry>,
    #[serde(default)]
    pub training: Vec<TrainingEntry>,
    #[serde(default)]
    pub metrics: DayMetrics,
}

impl DayLog {
    /// An empty log for the given date
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            training: Vec::new(),
            metrics: DayMetrics::default(),
        }
    }

    /// Whether this day counts as logged (at least one meal)
    pub fn has_meals(&self) -> bool {
        !self.meals.is_empty()
    }
}

// ============================================================================
// Food Library Types
// ============================================================================

/// A reference food used to pre-fill meal entries
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub serving_grams: f64,
    pub calories: i32,
    pub macros: Macros,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One line of a meal template
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_item_id: Option<String>,
    pub name: String,
    pub grams: f64,
    pub calories: i32,
    pub macros: Macros,
}

/// A reusable multi-item meal (e.g. a fixed breakfast)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTemplate {
    pub id: String,
    pub name: String,
    pub items: Vec<TemplateItem>,
}

impl MealTemplate {
    /// Sum of item calories
    pub fn total_calories(&self) -> i32 {
        self.items.iter().map(|i| i.calories).sum()
    }

    /// Component-wise sum of item macros
    pub fn total_macros(&self) -> Macros {
        self.items.iter().fold(Macros::default(), |acc, i| Macros {
            protein: acc.protein + i.macros.protein,
            carbs: acc.carbs + i.macros.carbs,
            fat: acc.fat + i.macros.fat,
        })
    }
}

// ============================================================================
// Application State
// ============================================================================

/// The entire persisted state: profile, log history, and reference data
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub profile: UserProfile,
    #[serde(default)]
    pub logs: BTreeMap<NaiveDate, DayLog>,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default)]
    pub templates: Vec<MealTemplate>,
}

impl AppState {
    /// Borrow the log for a date, if any was ever written
    pub fn log(&self, date: NaiveDate) -> Option<&DayLog> {
        self.logs.get(&date)
    }
}
