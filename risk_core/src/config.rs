//! Configuration file support for riskscore.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/riskscore/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub economics: EconomicsConfig,

    #[serde(default)]
    pub jitter: JitterConfig,
}

/// Substitutes for zero readings in raw records
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IntakeConfig {
    #[serde(default = "default_glucose")]
    pub glucose: f64,

    #[serde(default = "default_blood_pressure")]
    pub blood_pressure: f64,

    #[serde(default = "default_skin_thickness")]
    pub skin_thickness: f64,

    #[serde(default = "default_insulin")]
    pub insulin: f64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            glucose: default_glucose(),
            blood_pressure: default_blood_pressure(),
            skin_thickness: default_skin_thickness(),
            insulin: default_insulin(),
        }
    }
}

/// Cost model for intervention ROI
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EconomicsConfig {
    #[serde(default = "default_intervention_cost")]
    pub intervention_cost: f64,

    #[serde(default = "default_future_cost")]
    pub future_cost: f64,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            intervention_cost: default_intervention_cost(),
            future_cost: default_future_cost(),
        }
    }
}

/// Horizon jitter configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct JitterConfig {
    /// Fixed RNG seed; unset means fresh entropy per run
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_glucose() -> f64 {
    100.0
}

fn default_blood_pressure() -> f64 {
    80.0
}

fn default_skin_thickness() -> f64 {
    20.0
}

fn default_insulin() -> f64 {
    80.0
}

fn default_intervention_cost() -> f64 {
    20_000.0
}

fn default_future_cost() -> f64 {
    300_000.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            other => {
                tracing::info!("No config file found at {:?}, using defaults", other);
                Ok(Self::default())
            }
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

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("riskscore").join("config.toml"))
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

    /// Check that every substitute and cost is a positive finite number
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("intake.glucose", self.intake.glucose),
            ("intake.blood_pressure", self.intake.blood_pressure),
            ("intake.skin_thickness", self.intake.skin_thickness),
            ("intake.insulin", self.intake.insulin),
            ("economics.intervention_cost", self.economics.intervention_cost),
            ("economics.future_cost", self.economics.future_cost),
        ];

        for (key, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    key, value
                )));
            }
        }

        Ok(())
    }
}
