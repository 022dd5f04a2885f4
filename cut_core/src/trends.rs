//! Rolling averages, streaks, and multi-week projections.
//!
//! These functions aggregate the calculation engine's per-day outputs
//! over trailing windows. Like the engine itself they are pure: the
//! reference date ("today") is always passed in explicitly.
//!
//! The two streak scans are intentionally asymmetric. The training streak
//! starts at today and tolerates today being unlogged; the adherence
//! streak starts at yesterday because today's intake is still in
//! progress. Do not unify them.

use crate::engine::{
    accumulated_deficit, calorie_target, calories_remaining, day_deficit, day_type,
    days_remaining, projected_fat_loss, total_macros, total_meal_calories, EngineParams,
};
use crate::types::{DayLog, TrainingEntry, UserProfile};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Mean daily intake, protein, and deficit over a trailing window
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RollingAverage {
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_deficit: f64,
}

/// Projected total fat loss by the goal date, as a low/mid/high band
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeBand {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// One day of a weekly report
#[derive(Clone, Debug)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// Weekday abbreviation, e.g. "Mon"
    pub label: String,
    pub calories: i32,
    pub target: i32,
    pub protein: f64,
    /// None when the day has no logged meals
    pub deficit: Option<f64>,
    pub has_log: bool,
    pub training: Vec<TrainingEntry>,
}

/// Mean calories, protein, and deficit over the trailing `window_days`
/// calendar days ending today (inclusive)
///
/// Only days with at least one logged meal qualify, and the denominator
/// is the count of qualifying days, so sparse logging does not dilute
/// the averages. No qualifying days yields all zeros, never NaN.
pub fn rolling_average(
    profile: &UserProfile,
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    today: NaiveDate,
    window_days: u32,
) -> RollingAverage {
    let logged: Vec<(NaiveDate, &DayLog)> = (0..window_days)
        .map(|i| today - Duration::days(i64::from(i)))
        .filter_map(|d| logs.get(&d).map(|log| (d, log)))
        .filter(|(_, log)| log.has_meals())
        .collect();

    if logged.is_empty() {
        return RollingAverage::default();
    }

    let count = logged.len() as f64;
    let total_calories: i32 = logged
        .iter()
        .map(|&(_, log)| total_meal_calories(Some(log)))
        .sum();
    let total_protein: f64 = logged
        .iter()
        .map(|&(_, log)| total_macros(Some(log)).protein)
        .sum();
    let total_deficit: f64 = logged
        .iter()
        .map(|&(d, log)| day_deficit(profile, params, Some(log), d))
        .sum();

    RollingAverage {
        avg_calories: f64::from(total_calories) / count,
        avg_protein: total_protein / count,
        avg_deficit: total_deficit / count,
    }
}

/// Consecutive days with at least one training entry, scanning backward
/// from today
///
/// Today not being logged yet does not break the streak; any older gap
/// does. Capped at the configured lookback.
pub fn training_streak(
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    for i in 0..params.streak_lookback_days {
        let date = today - Duration::days(i64::from(i));
        let trained = logs
            .get(&date)
            .map(|log| !log.training.is_empty())
            .unwrap_or(false);

        if trained {
            streak += 1;
        } else if i > 0 {
            break;
        }
    }
    streak
}

/// Consecutive days on budget, scanning backward from yesterday
///
/// Today is excluded because it is still in progress. A day qualifies
/// when it has at least one meal and its remaining budget is no worse
/// than the configured tolerance; the first disqualifying day ends the
/// scan. Capped at the configured lookback.
pub fn adherence_streak(
    profile: &UserProfile,
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    for i in 1..=params.streak_lookback_days {
        let date = today - Duration::days(i64::from(i));
        let Some(log) = logs.get(&date) else {
            break;
        };
        if !log.has_meals() {
            break;
        }
        if calories_remaining(profile, Some(log), date) >= -params.adherence_tolerance_kcal {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Projected total fat loss by the goal date
///
/// Fat already lost (accumulated deficit since the start date) enters
/// all three bounds unscaled; the uncertainty band applies only to the
/// forward-projected component (7-day average deficit extrapolated over
/// the remaining days). A passed goal date produces degenerate negative
/// projections rather than an error. The low <= mid <= high ordering
/// inverts when the average deficit is a surplus.
pub fn projected_outcome(
    profile: &UserProfile,
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    today: NaiveDate,
) -> OutcomeBand {
    let avg_deficit = rolling_average(profile, params, logs, today, 7).avg_deficit;
    let days_left = days_remaining(profile.goal_date, today);
    let already_lost = projected_fat_loss(
        params,
        accumulated_deficit(profile, params, logs, profile.start_date, today, today),
    );

    let projected_extra = avg_deficit * days_left as f64 / params.kcal_per_kg_fat;
    OutcomeBand {
        low: already_lost + projected_extra * 0.85,
        mid: already_lost + projected_extra,
        high: already_lost + projected_extra * 1.15,
    }
}

/// Per-day records for the Monday-start week `weeks_back` whole weeks
/// before the current one
pub fn weekly_data(
    profile: &UserProfile,
    params: &EngineParams,
    logs: &BTreeMap<NaiveDate, DayLog>,
    today: NaiveDate,
    weeks_back: u32,
) -> Vec<WeekDay> {
    let week_start = today
        - Duration::days(i64::from(today.weekday().num_days_from_monday()))
        - Duration::weeks(i64::from(weeks_back));

    (0..7)
        .map(|i| {
            let date = week_start + Duration::days(i);
            let log = logs.get(&date);
            let target = calorie_target(profile, day_type(log, date));
            let has_log = log.map(DayLog::has_meals).unwrap_or(false);

            WeekDay {
                date,
                label: date.format("%a").to_string(),
                calories: total_meal_calories(log),
                target,
                protein: total_macros(log).protein,
                deficit: has_log.then(|| day_deficit(profile, params, log, date)),
                has_log,
                training: log.map(|l| l.training.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_profile;
    use crate::types::{DayMetrics, Macros, MealEntry, TrainingType};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(calories: i32, protein: f64) -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            time: "12:00".into(),
            name: "Test meal".into(),
            calories,
            macros: Macros {
                protein,
                carbs: 0.0,
                fat: 0.0,
            },
            notes: None,
        }
    }

    fn training(kind: TrainingType) -> TrainingEntry {
        TrainingEntry {
            id: Uuid::new_v4(),
            kind,
            duration_min: 45,
            distance_km: None,
            rpe: None,
            calories_burned: None,
            notes: None,
        }
    }

    fn log_with_meals(date: NaiveDate, meals: Vec<MealEntry>) -> DayLog {
        DayLog {
            date,
            meals,
            training: vec![],
            metrics: DayMetrics::default(),
        }
    }

    fn log_with_training(date: NaiveDate, kinds: Vec<TrainingType>) -> DayLog {
        DayLog {
            date,
            meals: vec![],
            training: kinds.into_iter().map(training).collect(),
            metrics: DayMetrics::default(),
        }
    }

    #[test]
    fn test_rolling_average_no_logged_days_is_zero_not_nan() {
        let profile = default_profile();
        let params = EngineParams::default();
        let logs = BTreeMap::new();

        let avg = rolling_average(&profile, &params, &logs, date(2026, 3, 15), 7);
        assert_eq!(avg, RollingAverage::default());
    }

    #[test]
    fn test_rolling_average_divides_by_logged_days_only() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15); // Sunday

        let mut logs = BTreeMap::new();
        // Two logged days in the window; one zero-meal day that must not count
        let d1 = date(2026, 3, 14);
        logs.insert(d1, log_with_meals(d1, vec![meal(1600, 100.0)]));
        let d2 = date(2026, 3, 12);
        logs.insert(d2, log_with_meals(d2, vec![meal(1800, 120.0)]));
        let d3 = date(2026, 3, 13);
        logs.insert(d3, log_with_meals(d3, vec![]));
        // Outside the 7-day window
        let d4 = date(2026, 3, 1);
        logs.insert(d4, log_with_meals(d4, vec![meal(4000, 10.0)]));

        let avg = rolling_average(&profile, &params, &logs, today, 7);
        assert!((avg.avg_calories - 1700.0).abs() < 1e-9);
        assert!((avg.avg_protein - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_training_streak_tolerates_unlogged_today() {
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        for i in 1..=3 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_training(d, vec![TrainingType::Run]));
        }

        // Today has no log at all, streak still counts the previous 3 days
        assert_eq!(training_streak(&params, &logs, today), 3);
    }

    #[test]
    fn test_training_streak_counts_today_and_breaks_on_gap() {
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        logs.insert(today, log_with_training(today, vec![TrainingType::Hybrid]));
        let d1 = today - Duration::days(1);
        logs.insert(d1, log_with_training(d1, vec![TrainingType::Walk]));
        // Gap at 2 days ago, then more training that must not count
        let d3 = today - Duration::days(3);
        logs.insert(d3, log_with_training(d3, vec![TrainingType::Run]));

        assert_eq!(training_streak(&params, &logs, today), 2);
    }

    #[test]
    fn test_training_streak_respects_lookback_cap() {
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        for i in 0..90 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_training(d, vec![TrainingType::Walk]));
        }

        assert_eq!(training_streak(&params, &logs, today), 60);
    }

    #[test]
    fn test_adherence_streak_ignores_today() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        // Today is massively over budget but still in progress
        logs.insert(today, log_with_meals(today, vec![meal(5000, 50.0)]));
        for i in 1..=4 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_meals(d, vec![meal(1500, 100.0)]));
        }

        assert_eq!(adherence_streak(&profile, &params, &logs, today), 4);
    }

    #[test]
    fn test_adherence_streak_breaks_past_tolerance() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        for i in 1..=2 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_meals(d, vec![meal(1500, 100.0)]));
        }
        // 3 days ago: Thursday 2026-03-12, running target 1800, eaten
        // 1901 → remaining -101, just past the 100 kcal tolerance
        let d3 = date(2026, 3, 12);
        logs.insert(d3, log_with_meals(d3, vec![meal(1901, 100.0)]));
        let d4 = date(2026, 3, 11);
        logs.insert(d4, log_with_meals(d4, vec![meal(1500, 100.0)]));

        assert_eq!(adherence_streak(&profile, &params, &logs, today), 2);
    }

    #[test]
    fn test_adherence_streak_tolerates_exactly_100_over() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        // Saturday 2026-03-14: rest target 1700, eaten 1800 → remaining -100
        let d1 = date(2026, 3, 14);
        logs.insert(d1, log_with_meals(d1, vec![meal(1800, 100.0)]));

        assert_eq!(adherence_streak(&profile, &params, &logs, today), 1);
    }

    #[test]
    fn test_adherence_streak_breaks_on_unlogged_day() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        let d1 = today - Duration::days(1);
        logs.insert(d1, log_with_meals(d1, vec![meal(1500, 100.0)]));
        // 2 days ago has a log but no meals → not logged, breaks immediately
        let d2 = today - Duration::days(2);
        logs.insert(d2, log_with_meals(d2, vec![]));
        let d3 = today - Duration::days(3);
        logs.insert(d3, log_with_meals(d3, vec![meal(1500, 100.0)]));

        assert_eq!(adherence_streak(&profile, &params, &logs, today), 1);
    }

    #[test]
    fn test_projected_outcome_band_ordering_in_deficit() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15); // well before the 2026-04-13 goal

        let mut logs = BTreeMap::new();
        for i in 0..7 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_meals(d, vec![meal(1500, 100.0)]));
        }

        let outcome = projected_outcome(&profile, &params, &logs, today);
        assert!(outcome.low <= outcome.mid);
        assert!(outcome.mid <= outcome.high);
        assert!(outcome.mid > 0.0);
    }

    #[test]
    fn test_projected_outcome_band_inverts_on_surplus() {
        // Eating far above TDEE every day gives a negative average deficit;
        // the band then inverts (low >= mid >= high). Accepted behavior,
        // not a defect.
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 15);

        let mut logs = BTreeMap::new();
        for i in 0..7 {
            let d = today - Duration::days(i);
            logs.insert(d, log_with_meals(d, vec![meal(4000, 100.0)]));
        }

        let outcome = projected_outcome(&profile, &params, &logs, today);
        assert!(outcome.low >= outcome.mid);
        assert!(outcome.mid >= outcome.high);
    }

    #[test]
    fn test_projected_outcome_already_lost_is_unscaled() {
        // With the goal date reached, the forward component vanishes and
        // all three bounds equal the fat already lost.
        let profile = default_profile();
        let params = EngineParams::default();
        let today = profile.goal_date;

        let mut logs = BTreeMap::new();
        let d = date(2026, 3, 10);
        logs.insert(d, log_with_meals(d, vec![meal(1500, 100.0)]));

        let outcome = projected_outcome(&profile, &params, &logs, today);
        assert!((outcome.low - outcome.mid).abs() < 1e-9);
        assert!((outcome.mid - outcome.high).abs() < 1e-9);
        assert!(outcome.mid > 0.0);
    }

    #[test]
    fn test_weekly_data_is_monday_start_week() {
        let profile = default_profile();
        let params = EngineParams::default();
        let logs = BTreeMap::new();
        // Wednesday 2026-03-11
        let today = date(2026, 3, 11);

        let week = weekly_data(&profile, &params, &logs, today, 0);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2026, 3, 9));
        assert_eq!(week[0].label, "Mon");
        assert_eq!(week[6].date, date(2026, 3, 15));
        assert_eq!(week[6].label, "Sun");
    }

    #[test]
    fn test_weekly_data_weeks_back_offset() {
        let profile = default_profile();
        let params = EngineParams::default();
        let logs = BTreeMap::new();
        let today = date(2026, 3, 11);

        let week = weekly_data(&profile, &params, &logs, today, 2);
        assert_eq!(week[0].date, date(2026, 2, 23));
        assert_eq!(week[6].date, date(2026, 3, 1));
    }

    #[test]
    fn test_weekly_data_deficit_null_when_unlogged() {
        let profile = default_profile();
        let params = EngineParams::default();
        let today = date(2026, 3, 11);

        let mut logs = BTreeMap::new();
        let logged = date(2026, 3, 9); // Monday → hybrid target 1900
        logs.insert(logged, log_with_meals(logged, vec![meal(1600, 110.0)]));
        let trained = date(2026, 3, 10);
        logs.insert(trained, log_with_training(trained, vec![TrainingType::Pilates]));

        let week = weekly_data(&profile, &params, &logs, today, 0);

        assert!(week[0].has_log);
        assert_eq!(week[0].calories, 1600);
        assert_eq!(week[0].target, 1900);
        assert!(week[0].deficit.is_some());

        // Tuesday has training but no meals: unlogged for deficit purposes
        assert!(!week[1].has_log);
        assert_eq!(week[1].deficit, None);
        assert_eq!(week[1].training.len(), 1);

        // Untouched days still resolve a schedule-based target
        assert_eq!(week[6].target, 1700);
    }
}
