//! The plugin's JSON config file
//!
//! Two string lists keyed exactly as operators write them:
//!
//! ```json
//! {
//!   "Blacklist": ["shortname", "shortname", "shortname"],
//!   "Default blueprints": ["shortname", "shortname", "shortname"]
//! }
//! ```

use super::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info, warn};

/// Placeholder written into a fresh config
pub const PLACEHOLDER_SHORTNAME: &str = "shortname";

/// Operator-facing hint logged whenever the file fails to parse
pub const CORRUPT_CONFIG_MESSAGE: &str =
    "Configuration file is corrupt! Check your config file at https://jsonlint.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Item short names never granted
    #[serde(rename = "Blacklist", default, deserialize_with = "null_as_empty")]
    pub blacklist: Vec<String>,

    /// Item short names in the default set
    #[serde(rename = "Default blueprints", default, deserialize_with = "null_as_empty")]
    pub default_blueprints: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for PluginConfig {
    fn default() -> Self {
        let placeholders = || vec![PLACEHOLDER_SHORTNAME.to_string(); 3];
        Self {
            blacklist: placeholders(),
            default_blueprints: placeholders(),
        }
    }
}

/// How a [`PluginConfig`] was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from disk
    Loaded,
    /// File was missing, empty or `null`; defaults were used and written back
    Defaulted,
    /// File could not be read or parsed; defaults are in effect and the file
    /// was left untouched for the operator to fix
    Corrupt(String),
}

/// Outcome of [`PluginConfig::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoad {
    pub config: PluginConfig,
    pub source: ConfigSource,
}

impl ConfigLoad {
    pub fn is_corrupt(&self) -> bool {
        matches!(self.source, ConfigSource::Corrupt(_))
    }
}

impl PluginConfig {
    pub fn blacklist_set(&self) -> HashSet<String> {
        self.blacklist.iter().cloned().collect()
    }

    pub fn default_set(&self) -> HashSet<String> {
        self.default_blueprints.iter().cloned().collect()
    }

    /// Parse config text. `Ok(None)` means the file holds no object.
    pub fn parse(contents: &str) -> Result<Option<Self>, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<Option<Self>>(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Read the file. `Ok(None)` for a missing file or one with no object.
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::FileReadError(e.to_string())),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWriteError(e.to_string()))?;
        }
        std::fs::write(path, contents).map_err(|e| ConfigError::FileWriteError(e.to_string()))
    }

    /// Load the config, falling back to defaults instead of failing.
    ///
    /// Loaded and defaulted configs are written back so the file on disk is
    /// always complete. A corrupt file is reported and left as is.
    pub fn load(path: impl AsRef<Path>) -> ConfigLoad {
        let path = path.as_ref();

        let load = match Self::read(path) {
            Ok(Some(config)) => ConfigLoad {
                config,
                source: ConfigSource::Loaded,
            },
            Ok(None) => {
                info!(path = %path.display(), "No configuration found, creating default");
                ConfigLoad {
                    config: Self::default(),
                    source: ConfigSource::Defaulted,
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "{}", CORRUPT_CONFIG_MESSAGE);
                return ConfigLoad {
                    config: Self::default(),
                    source: ConfigSource::Corrupt(e.to_string()),
                };
            }
        };

        if let Err(e) = load.config.save(path) {
            warn!(path = %path.display(), error = %e, "Could not write configuration back");
        }

        load
    }
}
