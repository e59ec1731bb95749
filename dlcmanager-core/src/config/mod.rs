//! Configuration management
//!
//! Two layers:
//! - [`PluginConfig`]: the operator-edited JSON file (blacklist and default
//!   blueprints), which never fails to load
//! - [`HostSettings`]: TOML settings for the standalone host process, with
//!   environment overrides and validation

use crate::logging::{LogConfig, LogLevel};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

mod error;
mod plugin;

pub use error::ConfigError;
pub use plugin::{ConfigLoad, ConfigSource, PluginConfig, CORRUPT_CONFIG_MESSAGE, PLACEHOLDER_SHORTNAME};

/// Settings for the process hosting the plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Location of the plugin's JSON config
    pub plugin_config: PathBuf,

    /// Wait before the startup pass over already-connected players
    #[serde(with = "humantime_serde")]
    pub catch_up_delay: Duration,

    /// Repeat interval of the corrupt-config warning
    #[serde(with = "humantime_serde")]
    pub corrupt_warning_interval: Duration,

    /// Grace period given to background tasks on shutdown
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,

    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub json_format: bool,
    pub with_target: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            plugin_config: PathBuf::from("config/DLCManager.json"),
            catch_up_delay: Duration::from_secs(1),
            corrupt_warning_interval: Duration::from_secs(10),
            shutdown_grace: Duration::from_millis(250),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json_format: false,
            with_target: true,
        }
    }
}

impl LoggingSettings {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::new(self.level)
            .with_target(self.with_target)
            .json_format(self.json_format)
    }
}

impl HostSettings {
    /// Defaults overridden by `DLCMANAGER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.apply_env()?;
        Ok(settings)
    }

    /// Apply `DLCMANAGER_*` environment overrides on top of `self`
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("DLCMANAGER_CONFIG") {
            self.plugin_config = PathBuf::from(path);
        }
        if let Ok(delay) = env::var("DLCMANAGER_CATCH_UP_DELAY") {
            self.catch_up_delay = humantime_serde::re::humantime::parse_duration(&delay)
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid catch-up delay: {}", e)))?;
        }
        if let Ok(level) = env::var("DLCMANAGER_LOG_LEVEL") {
            self.logging.level = level
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("{}", e)))?;
        }
        if let Ok(json) = env::var("DLCMANAGER_LOG_JSON") {
            self.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        self.validate()
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let settings: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::FileWriteError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corrupt_warning_interval.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "corrupt_warning_interval must be greater than 0".to_string(),
            ));
        }

        if self.plugin_config.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "plugin_config path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
