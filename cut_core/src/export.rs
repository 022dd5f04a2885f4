//! Export and import of the persisted state.
//!
//! JSON export round-trips the entire `{profile, logs, foods, templates}`
//! structure. CSV export flattens one row per meal, plus one placeholder
//! row for days that were logged without meals so their training and
//! metrics still appear.

use crate::types::{AppState, DayLog};
use crate::{Error, Result};

/// A flattened spreadsheet row
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    date: String,
    meal: String,
    calories: Option<i32>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    training: String,
    steps: Option<u32>,
    weight: Option<f64>,
}

fn training_summary(log: &DayLog) -> String {
    log.training
        .iter()
        .map(|t| format!("{} {}min", t.kind.label(), t.duration_min))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialize the full state as pretty-printed JSON
pub fn export_json(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parse a previously exported JSON state
///
/// Malformed input fails with a distinct import error so the caller can
/// tell the user to check the file format, rather than silently
/// replacing their data.
pub fn import_json(json: &str) -> Result<AppState> {
    serde_json::from_str::<AppState>(json).map_err(|e| {
        Error::Import(format!(
            "could not parse the file, check the file format: {}",
            e
        ))
    })
}

/// Flatten the log history into CSV, one row per meal
///
/// Days with a log but no meals get a single placeholder row so their
/// training, steps, and weight are not dropped. Days are emitted in
/// ascending date order.
pub fn export_csv(state: &AppState) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (date, log) in &state.logs {
        let training = training_summary(log);

        if log.meals.is_empty() {
            writer.serialize(CsvRow {
                date: date.to_string(),
                meal: String::new(),
                calories: None,
                protein: None,
                carbs: None,
                fat: None,
                training: training.clone(),
                steps: log.metrics.steps,
                weight: log.metrics.weight_kg,
            })?;
        }

        for meal in &log.meals {
            writer.serialize(CsvRow {
                date: date.to_string(),
                meal: meal.name.clone(),
                calories: Some(meal.calories),
                protein: Some(meal.macros.protein),
                carbs: Some(meal.macros.carbs),
                fat: Some(meal.macros.fat),
                training: training.clone(),
                steps: log.metrics.steps,
                weight: log.metrics.weight_kg,
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV was not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seeded_state;
    use crate::types::{Macros, MealEntry, TrainingEntry, TrainingType};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(name: &str, calories: i32) -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            time: "12:00".into(),
            name: name.into(),
            calories,
            macros: Macros {
                protein: 40.0,
                carbs: 50.0,
                fat: 15.0,
            },
            notes: None,
        }
    }

    fn sample_state() -> AppState {
        let mut state = seeded_state();

        let d1 = date(2026, 3, 2);
        let mut log = DayLog::empty(d1);
        log.meals.push(meal("Breakfast", 344));
        log.meals.push(meal("Lunch", 650));
        log.metrics.steps = Some(10400);
        log.metrics.weight_kg = Some(59.6);
        state.logs.insert(d1, log);

        // A day with training and metrics but no meals
        let d2 = date(2026, 3, 3);
        let mut log = DayLog::empty(d2);
        log.training.push(TrainingEntry {
            id: Uuid::new_v4(),
            kind: TrainingType::Pilates,
            duration_min: 50,
            distance_km: None,
            rpe: Some(5),
            calories_burned: None,
            notes: None,
        });
        log.metrics.steps = Some(7200);
        state.logs.insert(d2, log);

        state
    }

    #[test]
    fn test_json_roundtrip() {
        let state = sample_state();
        let json = export_json(&state).unwrap();
        let imported = import_json(&json).unwrap();

        assert_eq!(imported.logs.len(), 2);
        assert_eq!(imported.foods.len(), state.foods.len());
        let log = imported.log(date(2026, 3, 2)).unwrap();
        assert_eq!(log.meals.len(), 2);
        assert_eq!(log.metrics.weight_kg, Some(59.6));
    }

    #[test]
    fn test_import_malformed_json_fails_distinctly() {
        let result = import_json("{ this is not json");
        match result {
            Err(Error::Import(msg)) => assert!(msg.contains("check the file format")),
            Err(e) => panic!("Expected Import error, got {}", e),
            Ok(_) => panic!("Expected Import error, got success"),
        }
    }

    #[test]
    fn test_import_wrong_shape_fails_distinctly() {
        let result = import_json(r#"{"some": "other", "document": true}"#);
        assert!(matches!(result, Err(Error::Import(_))));
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_meal() {
        let csv = export_csv(&sample_state()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Date,Meal,Calories,Protein,Carbs,Fat,Training,Steps,Weight"
        );
        // 2 meal rows + 1 placeholder row
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2026-03-02,Breakfast,344,"));
        assert!(lines[2].starts_with("2026-03-02,Lunch,650,"));
    }

    #[test]
    fn test_csv_placeholder_row_for_meal_less_day() {
        let csv = export_csv(&sample_state()).unwrap();
        let placeholder = csv
            .lines()
            .find(|l| l.starts_with("2026-03-03"))
            .expect("placeholder row missing");

        assert!(placeholder.contains("Pilates 50min"));
        assert!(placeholder.contains("7200"));
    }

    #[test]
    fn test_csv_empty_state_is_header_only() {
        let csv = export_csv(&seeded_state()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
