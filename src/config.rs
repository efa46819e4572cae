//! Application configuration.
//!
//! Handles loading and validating `folio.toml`. The file is optional and
//! sparse — defaults cover everything, and a config file only overrides the
//! values it names. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [storage]
//! dir = ".folio"    # Directory holding the persisted snapshot
//! ```
//!
//! The admin passphrase is deliberately not configurable here: it is fixed
//! at build time (see [`crate::auth`]) and a config file entry would only
//! add a second place for it to leak from.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file within the site root.
pub const CONFIG_FILENAME: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Snapshot storage settings.
    pub storage: StorageConfig,
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the persisted snapshot, relative to the site root.
    pub dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: ".folio".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from `root`, using defaults if no file exists.
pub fn load_config(root: &Path) -> Result<AppConfig, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `folio.toml` for the `gen-config` command.
pub fn stock_config_toml() -> String {
    "\
# folio configuration - all options are optional, defaults shown

[storage]
# Directory holding the persisted snapshot, relative to the site root.
dir = \".folio\"
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.storage.dir, ".folio");
    }

    #[test]
    fn sparse_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[storage]\ndir = \"state\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.storage.dir, "state");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.storage.dir, ".folio");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[storage]\ndirr = \"typo\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn empty_storage_dir_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[storage]\ndir = \" \"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_and_matches_defaults() {
        let parsed: AppConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed.storage.dir, AppConfig::default().storage.dir);
    }
}
