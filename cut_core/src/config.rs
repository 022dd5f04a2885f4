//! Configuration file support for Cutt.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cutt/config.toml`.

use crate::engine::{EngineParams, TdeeMultipliers};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Tunable engine constants
///
/// The defaults are the heuristics the calorie targets were tuned with;
/// they live here so a user can adjust them without a rebuild.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_kcal_per_kg_fat")]
    pub kcal_per_kg_fat: f64,

    #[serde(default = "default_tdee_multiplier_hybrid")]
    pub tdee_multiplier_hybrid: f64,

    #[serde(default = "default_tdee_multiplier_running")]
    pub tdee_multiplier_running: f64,

    #[serde(default = "default_tdee_multiplier_pilates")]
    pub tdee_multiplier_pilates: f64,

    #[serde(default = "default_tdee_multiplier_rest")]
    pub tdee_multiplier_rest: f64,

    #[serde(default = "default_adherence_tolerance_kcal")]
    pub adherence_tolerance_kcal: i32,

    #[serde(default = "default_streak_lookback_days")]
    pub streak_lookback_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kcal_per_kg_fat: default_kcal_per_kg_fat(),
            tdee_multiplier_hybrid: default_tdee_multiplier_hybrid(),
            tdee_multiplier_running: default_tdee_multiplier_running(),
            tdee_multiplier_pilates: default_tdee_multiplier_pilates(),
            tdee_multiplier_rest: default_tdee_multiplier_rest(),
            adherence_tolerance_kcal: default_adherence_tolerance_kcal(),
            streak_lookback_days: default_streak_lookback_days(),
        }
    }
}

impl EngineConfig {
    /// Convert into the parameter struct the engine consumes
    pub fn params(&self) -> EngineParams {
        EngineParams {
            kcal_per_kg_fat: self.kcal_per_kg_fat,
            tdee_multipliers: TdeeMultipliers {
                hybrid: self.tdee_multiplier_hybrid,
                running: self.tdee_multiplier_running,
                pilates: self.tdee_multiplier_pilates,
                rest: self.tdee_multiplier_rest,
            },
            adherence_tolerance_kcal: self.adherence_tolerance_kcal,
            streak_lookback_days: self.streak_lookback_days,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("cutt")
}

fn default_kcal_per_kg_fat() -> f64 {
    7700.0
}

fn default_tdee_multiplier_hybrid() -> f64 {
    1.0
}

fn default_tdee_multiplier_running() -> f64 {
    1.0
}

fn default_tdee_multiplier_pilates() -> f64 {
    0.97
}

fn default_tdee_multiplier_rest() -> f64 {
    0.90
}

fn default_adherence_tolerance_kcal() -> i32 {
    100
}

fn default_streak_lookback_days() -> u32 {
    60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("cutt").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.kcal_per_kg_fat, 7700.0);
        assert_eq!(config.engine.adherence_tolerance_kcal, 100);
        assert_eq!(config.engine.streak_lookback_days, 60);
    }

    #[test]
    fn test_default_params_match_engine_defaults() {
        let params = Config::default().engine.params();
        assert_eq!(params, EngineParams::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.engine.kcal_per_kg_fat, parsed.engine.kcal_per_kg_fat);
        assert_eq!(config.data.data_dir, parsed.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[engine]
adherence_tolerance_kcal = 150
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.adherence_tolerance_kcal, 150);
        assert_eq!(config.engine.tdee_multiplier_rest, 0.90); // default
    }
}
