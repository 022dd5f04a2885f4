//! Owned application store: mutation API over the persisted state.
//!
//! The store owns the `AppState` and its backing file. Every mutation
//! persists before returning, so a crash never loses an acknowledged
//! write. Accessors hand out copies; the calculation engine only ever
//! borrows read-only views of the state.
//!
//! Day logs are created lazily: reading a date that was never written
//! returns an empty log without materializing it.

use crate::engine::calories_from_macros;
use crate::types::{
    AppState, DayLog, DayMetrics, FoodItem, Macros, MealEntry, MealTemplate, TrainingEntry,
    TrainingType, UserProfile,
};
use crate::{catalog, Error, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A meal as entered by the user, before an id is assigned
#[derive(Clone, Debug)]
pub struct NewMeal {
    pub time: String,
    pub name: String,
    /// Zero means "derive from macros"
    pub calories: i32,
    pub macros: Macros,
    pub notes: Option<String>,
}

/// A training session as entered by the user, before an id is assigned
#[derive(Clone, Debug)]
pub struct NewTraining {
    pub kind: TrainingType,
    pub duration_min: i32,
    pub distance_km: Option<f64>,
    pub rpe: Option<u8>,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
}

/// The single owner of the persisted application state
pub struct Store {
    state: AppState,
    path: PathBuf,
}

impl Store {
    /// Open the store backed by the given state file
    ///
    /// A missing file yields the seeded default state; nothing is
    /// written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = AppState::load(&path)?;
        Ok(Self { state, path })
    }

    /// Read-only view of the whole state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn profile(&self) -> &UserProfile {
        &self.state.profile
    }

    /// Copy of the log for a date; an empty log if never written
    pub fn day_log(&self, date: NaiveDate) -> DayLog {
        self.state
            .logs
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayLog::empty(date))
    }

    fn persist(&self) -> Result<()> {
        self.state.save(&self.path)
    }

    fn log_entry(&mut self, date: NaiveDate) -> &mut DayLog {
        self.state
            .logs
            .entry(date)
            .or_insert_with(|| DayLog::empty(date))
    }

    /// Replace the profile wholesale (settings save)
    pub fn update_profile(&mut self, profile: UserProfile) -> Result<()> {
        self.state.profile = profile;
        self.persist()
    }

    /// Append a meal to a date's log, assigning an id
    ///
    /// When calories are zero they are back-filled from the macros via
    /// the Atwater factors.
    pub fn add_meal(&mut self, date: NaiveDate, meal: NewMeal) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let calories = if meal.calories == 0 {
            calories_from_macros(&meal.macros)
        } else {
            meal.calories
        };

        self.log_entry(date).meals.push(MealEntry {
            id,
            time: meal.time,
            name: meal.name,
            calories,
            macros: meal.macros,
            notes: meal.notes,
        });
        self.persist()?;

        tracing::debug!("Added meal {} on {}", id, date);
        Ok(id)
    }

    /// Replace an existing meal entry in place
    pub fn update_meal(&mut self, date: NaiveDate, meal: MealEntry) -> Result<()> {
        let log = self.log_entry(date);
        match log.meals.iter_mut().find(|m| m.id == meal.id) {
            Some(slot) => *slot = meal,
            None => {
                return Err(Error::Store(format!("no meal {} on {}", meal.id, date)));
            }
        }
        self.persist()
    }

    pub fn delete_meal(&mut self, date: NaiveDate, id: Uuid) -> Result<()> {
        let log = self.log_entry(date);
        let before = log.meals.len();
        log.meals.retain(|m| m.id != id);
        if log.meals.len() == before {
            return Err(Error::Store(format!("no meal {} on {}", id, date)));
        }
        self.persist()
    }

    /// Append a training session to a date's log, assigning an id
    pub fn add_training(&mut self, date: NaiveDate, training: NewTraining) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.log_entry(date).training.push(TrainingEntry {
            id,
            kind: training.kind,
            duration_min: training.duration_min,
            distance_km: training.distance_km,
            rpe: training.rpe,
            calories_burned: training.calories_burned,
            notes: training.notes,
        });
        self.persist()?;

        tracing::debug!("Added training {} on {}", id, date);
        Ok(id)
    }

    pub fn update_training(&mut self, date: NaiveDate, training: TrainingEntry) -> Result<()> {
        let log = self.log_entry(date);
        match log.training.iter_mut().find(|t| t.id == training.id) {
            Some(slot) => *slot = training,
            None => {
                return Err(Error::Store(format!(
                    "no training {} on {}",
                    training.id, date
                )));
            }
        }
        self.persist()
    }

    pub fn delete_training(&mut self, date: NaiveDate, id: Uuid) -> Result<()> {
        let log = self.log_entry(date);
        let before = log.training.len();
        log.training.retain(|t| t.id != id);
        if log.training.len() == before {
            return Err(Error::Store(format!("no training {} on {}", id, date)));
        }
        self.persist()
    }

    /// Edit a date's metrics in place (merge-style update)
    pub fn update_metrics<F>(&mut self, date: NaiveDate, f: F) -> Result<()>
    where
        F: FnOnce(&mut DayMetrics),
    {
        f(&mut self.log_entry(date).metrics);
        self.persist()
    }

    pub fn add_food(&mut self, food: FoodItem) -> Result<()> {
        self.state.foods.push(food);
        self.persist()
    }

    pub fn update_food(&mut self, food: FoodItem) -> Result<()> {
        match self.state.foods.iter_mut().find(|f| f.id == food.id) {
            Some(slot) => *slot = food,
            None => return Err(Error::Store(format!("no food item {}", food.id))),
        }
        self.persist()
    }

    pub fn remove_food(&mut self, id: &str) -> Result<()> {
        let before = self.state.foods.len();
        self.state.foods.retain(|f| f.id != id);
        if self.state.foods.len() == before {
            return Err(Error::Store(format!("no food item {}", id)));
        }
        self.persist()
    }

    pub fn add_template(&mut self, template: MealTemplate) -> Result<()> {
        self.state.templates.push(template);
        self.persist()
    }

    /// Find a template by id or (case-insensitive) name
    pub fn find_template(&self, key: &str) -> Option<&MealTemplate> {
        self.state
            .templates
            .iter()
            .find(|t| t.id == key || t.name.eq_ignore_ascii_case(key))
    }

    /// Replace everything with an imported state
    pub fn replace(&mut self, state: AppState) -> Result<()> {
        self.state = state;
        self.persist()
    }

    /// Replace everything with the seeded defaults
    pub fn reset(&mut self) -> Result<()> {
        self.state = catalog::seeded_state();
        self.persist()
    }

    /// The state file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }
}
