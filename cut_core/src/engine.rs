//! Calculation engine: day classification, targets, and deficits.
//!
//! Every function here is pure and total over well-formed input. "Today"
//! is always an explicit parameter, never read from the wall clock, so
//! tests can pin it to a known date.
//!
//! Two distinct deficit notions coexist and must not be collapsed:
//! - `calories_remaining` measures adherence against the fixed day target
//! - `day_deficit` estimates the true energy deficit against TDEE

use crate::catalog::scheduled_training;
use crate::types::{DayLog, DayType, Macros, TrainingType, UserProfile};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// TDEE multiplier per day type
///
/// Encodes lower baseline burn on lighter days. Kept configurable rather
/// than hard-coded; defaults match the values the targets were tuned with.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TdeeMultipliers {
    pub hybrid: f64,
    pub running: f64,
    pub pilates: f64,
    pub rest: f64,
}

impl Default for TdeeMultipliers {
    fn default() -> Self {
        Self {
            hybrid: 1.0,
            running: 1.0,
            pilates: 0.97,
            rest: 0.90,
        }
    }
}

impl TdeeMultipliers {
    pub fn get(&self, day_type: DayType) -> f64 {
        match day_type {
            DayType::Hybrid => self.hybrid,
            DayType::Running => self.running,
            DayType::Pilates => self.pilates,
            DayType::Rest => self.rest,
        }
    }
}

/// Tunable constants consumed by the engine
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct EngineParams {
    /// kcal per kg of fat mass, used for all fat-loss conversions
    pub kcal_per_kg_fat: f64,
    pub tdee_multipliers: TdeeMultipliers,
    /// Over-budget tolerance before an adherence streak breaks
    pub adherence_tolerance_kcal: i32,
    /// Hard cap on backward streak scans
    pub streak_lookback_days: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            kcal_per_kg_fat: 7700.0,
            tdee_multipliers: TdeeMultipliers::default(),
            adherence_tolerance_kcal: 100,
            streak_lookback_days: 60,
        }
    }
}

/// Classify a calendar day as hybrid, running, pilates, or rest
///
/// A manual override on the day's metrics always wins. Otherwise the
/// weekday schedule is unioned with the training actually logged and the
/// first match in priority order (hybrid, running, pilates) decides.
pub fn day_type(log: Option<&DayLog>, date: NaiveDate) -> DayType {
    if let Some(override_type) = log.and_then(|l| l.metrics.day_type_override) {
        return override_type;
    }

    let scheduled = scheduled_training(date.weekday());
    let logged = log.map(|l| l.training.as_slice()).unwrap_or(&[]);

    let all_types = scheduled
        .iter()
        .copied()
        .chain(logged.iter().map(|t| t.kind));

    let mut has_running = false;
    let mut has_pilates = false;
    for kind in all_types {
        match kind {
            TrainingType::Hybrid => return DayType::Hybrid,
            TrainingType::RunZ2 | TrainingType::Run => has_running = true,
            TrainingType::Pilates => has_pilates = true,
            TrainingType::Strength | TrainingType::Walk | TrainingType::Rest => {}
        }
    }

    if has_running {
        DayType::Running
    } else if has_pilates {
        DayType::Pilates
    } else {
        DayType::Rest
    }
}

/// The fixed kcal target for a day type
pub fn calorie_target(profile: &UserProfile, day_type: DayType) -> i32 {
    profile.calorie_targets.get(day_type)
}

/// Sum of meal calories; absent log contributes zero
pub fn total_meal_calories(log: Option<&DayLog>) -> i32 {
    log.map(|l| l.meals.iter().map(|m| m.calories).sum())
        .unwrap_or(0)
}

/// Component-wise sum of meal macros; absent log contributes zeros
pub fn total_macros(log: Option<&DayLog>) -> Macros {
    let Some(log) = log else {
        return Macros::default();
    };

    log.meals.iter().fold(Macros::default(), |acc, m| Macros {
        protein: acc.protein + m.macros.protein,
        carbs: acc.carbs + m.macros.carbs,
        fat: acc.fat + m.macros.fat,
    })
}

/// Sum of logged exercise calories; entries without a value contribute zero
pub fn exercise_calories(log: Option<&DayLog>) -> i32 {
    log.map(|l| {
        l.training
            .iter()
            .map(|t| t.calories_burned.unwrap_or(0))
            .sum()
    })
    .unwrap_or(0)
}

/// Calories from macros via the Atwater factors (4/4/9)
///
/// Used to back-fill a meal's calories when only macros were entered.
pub fn calories_from_macros(macros: &Macros) -> i32 {
    (macros.protein * 4.0 + macros.carbs * 4.0 + macros.fat * 9.0).round() as i32
}

/// Budget left for the day: target - eaten, plus exercise if the profile
/// counts exercise calories back into the budget. Negative when over.
pub fn calories_remaining(profile: &UserProfile, log: Option<&DayLog>, date: NaiveDate) -> i32 {
    let target = calorie_target(profile, day_type(log, date));
    let eaten = total_meal_calories(log);
    let exercise = if profile.count_exercise_calories {
        exercise_calories(log)
    } else {
        0
    };
    target - eaten + exercise
}

/// Estimated true energy deficit for the day, independent of the target
///
/// TDEE is scaled by the day-type multiplier. When exercise calories are
/// not added back into the budget they are subtracted from intake here
/// instead, so the deficit they create is not double-counted. Positive
/// means a deficit (fat loss); negative means a surplus.
pub fn day_deficit(
    profile: &UserProfile,
    params: &EngineParams,
    log: Option<&DayLog>,
    date: NaiveDate,
) -> f64 {
    let eaten = total_meal_calories(log);
    let exercise = exercise_calories(log);

    let tdee = f64::from(profile.maintenance_tdee) * params.tdee_multipliers.get(day_type(log, date));
    let net_calories = if profile.count_exercise_calories {
        eaten
    } else {
        eaten - exercise
    };

    tdee - f64::from(net_calories)
}

/// Sum of day deficits over `[from, to]` inclusive
///
/// Days strictly after `today` are clamped out, and only days whose log
/// has at least one meal contribute; unlogged days are excluded from the
/// walk entirely rather than counted as zero. An inverted range yields 0.
pub fn accumulated_deficit(
    profile: &UserProfile,
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
) -> f64 {
    if from > to {
        return 0.0;
    }

    let mut total = 0.0;
    for date in from.iter_days().take_while(|d| *d <= to) {
        if date > today {
            break;
        }
        if let Some(log) = logs.get(&date) {
            if log.has_meals() {
                total += day_deficit(profile, params, Some(log), date);
            }
        }
    }
    total
}

/// Convert an accumulated kcal deficit into kg of fat
pub fn projected_fat_loss(params: &EngineParams, accumulated_kcal: f64) -> f64 {
    accumulated_kcal / params.kcal_per_kg_fat
}

/// Whole days from `today` until the goal date; negative once it passed
pub fn days_remaining(goal_date: NaiveDate, today: NaiveDate) -> i64 {
    (goal_date - today).num_days()
}

/// Whole days since the start date, clamped at zero
pub fn days_elapsed(start_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - start_date).num_days().max(0)
}
