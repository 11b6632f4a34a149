//! Configuration file support for Bump.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bump/config.toml`.

use crate::{Error, JourneyStage, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub journey: JourneyConfig,
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

impl DataConfig {
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn symptom_log_path(&self) -> PathBuf {
        self.data_dir.join("symptoms.jsonl")
    }
}

/// Journey defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Stage used by `setup` when none is given
    #[serde(default)]
    pub default_stage: JourneyStage,

    /// Window for `symptom list` when `--days` is omitted
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            default_stage: JourneyStage::default(),
            recent_days: default_recent_days(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("bump")
}

fn default_recent_days() -> i64 {
    7
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

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("bump").join("config.toml")
    }

    /// Reject values no command could work with
    pub fn validate(&self) -> Result<()> {
        if self.journey.recent_days <= 0 {
            return Err(Error::Config(format!(
                "journey.recent_days must be positive, got {}",
                self.journey.recent_days
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
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
