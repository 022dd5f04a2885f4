#![forbid(unsafe_code)]

//! Core domain model and business logic for the Cutt calorie tracker.
//!
//! This crate provides:
//! - Domain types (profile, day logs, food library, templates)
//! - The pure calculation engine (day types, targets, deficits)
//! - Trend aggregation (rolling averages, streaks, projections)
//! - Persistence (state file, owned store)
//! - Export/import (JSON, CSV)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod engine;
pub mod trends;
pub mod state;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{seeded_state, scheduled_training};
pub use config::Config;
pub use engine::{EngineParams, TdeeMultipliers};
pub use trends::{OutcomeBand, RollingAverage, WeekDay};
pub use store::{NewMeal, NewTraining, Store};
