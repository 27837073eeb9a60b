//! Configuration module for spotsearch
//!
//! Tunables for the overlay core: the debounce quiet interval, the mode the
//! overlay opens in, and whether failed follow requests revert.
//! Configuration is stored in the user's config directory.

use crate::models::SearchMode;
use crate::search::DEFAULT_QUIET_INTERVAL;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const fn default_debounce_ms() -> u64 {
    DEFAULT_QUIET_INTERVAL.as_millis() as u64
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpotsearchConfig {
    /// Quiet interval before a typed query is dispatched, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Tab the overlay opens on
    #[serde(default)]
    pub initial_mode: SearchMode,

    /// Flip a follow toggle back when the backend reports failure
    #[serde(default)]
    pub revert_failed_follows: bool,
}

impl Default for SpotsearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            initial_mode: SearchMode::default(),
            revert_failed_follows: false,
        }
    }
}

impl SpotsearchConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("spotsearch").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration as TOML to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized or
    /// the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Render the configuration as pretty TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// The debounce quiet interval
    #[must_use]
    pub const fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
