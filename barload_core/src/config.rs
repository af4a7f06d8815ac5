//! Configuration file support for Barload.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/barload/config.toml`.

use crate::{Error, Result, Settings, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub streak: StreakConfig,
}

/// Data file configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
        }
    }
}

/// Training preferences
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default)]
    pub weight_unit: WeightUnit,

    /// 0 = Sunday .. 6 = Saturday
    #[serde(default = "default_start_week_on")]
    pub start_week_on: u8,

    /// RPE assumed for sets planned without an intensity
    #[serde(default = "default_rpe")]
    pub default_rpe: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::default(),
            start_week_on: default_start_week_on(),
            default_rpe: default_rpe(),
        }
    }
}

/// Adherence streak parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default = "default_min_sessions_per_week")]
    pub min_sessions_per_week: u32,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            min_sessions_per_week: default_min_sessions_per_week(),
        }
    }
}

// Default value functions
fn default_history_file() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".local/share")
    });
    base.join("barload").join("history.json")
}

fn default_start_week_on() -> u8 {
    1
}

fn default_rpe() -> f64 {
    crate::intensity::DEFAULT_RPE
}

fn default_min_sessions_per_week() -> u32 {
    crate::streak::MIN_SESSIONS_PER_WEEK
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
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.training.start_week_on > 6 {
            return Err(Error::Config(format!(
                "start_week_on must be 0 (Sunday) to 6 (Saturday), got {}",
                self.training.start_week_on
            )));
        }
        if !(0.0..=10.0).contains(&self.training.default_rpe) {
            return Err(Error::Config(format!(
                "default_rpe must be between 0 and 10, got {}",
                self.training.default_rpe
            )));
        }
        if self.streak.min_sessions_per_week == 0 {
            return Err(Error::Config(
                "min_sessions_per_week must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("barload").join("config.toml")
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

    /// Calculator settings derived from this configuration
    pub fn settings(&self) -> Settings {
        Settings {
            weight_unit: self.training.weight_unit,
            start_week_on: self.training.start_week_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.training.weight_unit, WeightUnit::Kg);
        assert_eq!(config.training.start_week_on, 1);
        assert_eq!(config.training.default_rpe, 8.0);
        assert_eq!(config.streak.min_sessions_per_week, 3);
        assert!(config.data.history_file.ends_with("barload/history.json"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.training.weight_unit = WeightUnit::Lbs;
        config.training.start_week_on = 0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.training.weight_unit, WeightUnit::Lbs);
        assert_eq!(loaded.training.start_week_on, 0);
        assert_eq!(loaded.data.history_file, config.data.history_file);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[training]
weight_unit = "lbs"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.training.weight_unit, WeightUnit::Lbs);
        assert_eq!(config.training.start_week_on, 1); // default
        assert_eq!(config.streak.min_sessions_per_week, 3); // default
    }

    #[test]
    fn test_invalid_start_week_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[training]\nstart_week_on = 7\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_settings_conversion() {
        let mut config = Config::default();
        config.training.start_week_on = 0;
        let settings = config.settings();
        assert_eq!(settings.start_week_on, 0);
        assert_eq!(settings.weight_unit, WeightUnit::Kg);
    }
}
