//! # Shell Configuration
//!
//! Settings for the interactive shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --file stock.json                                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOCKROOM_INVENTORY_FILE=stock.json                                │
//! │     STOCKROOM_CURRENCY_SYMBOL=$                                        │
//! │     STOCKROOM_LOAD_ON_START=false                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/stockroom/config.toml (Linux)                            │
//! │     ~/Library/Application Support/com.stockroom.stockroom/config.toml  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     inventory.json, "Rs.", load on start                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! inventory_file = "/var/lib/stockroom/inventory.json"
//! currency_symbol = "Rs."
//! load_on_start = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stockroom_core::money::DEFAULT_CURRENCY_SYMBOL;
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Configuration
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// File offered by the save/load prompts and read at startup.
    pub inventory_file: PathBuf,

    /// Prefix for every printed price.
    pub currency_symbol: String,

    /// Load `inventory_file` at startup when it exists.
    pub load_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            inventory_file: PathBuf::from("inventory.json"),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            load_on_start: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config directory)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.inventory_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "inventory_file must not be empty".into(),
            ));
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOCKROOM_*` overrides read through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(file) = lookup("STOCKROOM_INVENTORY_FILE") {
            debug!(file = %file, "Overriding inventory file from environment");
            self.inventory_file = PathBuf::from(file);
        }

        if let Some(symbol) = lookup("STOCKROOM_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(flag) = lookup("STOCKROOM_LOAD_ON_START") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.load_on_start = true,
                "0" | "false" | "no" | "off" => self.load_on_start = false,
                _ => warn!(value = %flag, "Unknown STOCKROOM_LOAD_ON_START value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.inventory_file, PathBuf::from("inventory.json"));
        assert_eq!(config.currency_symbol, "Rs.");
        assert!(config.load_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());

        config.currency_symbol = "$".to_string();
        config.inventory_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "currency_symbol = \"$\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.inventory_file, PathBuf::from("inventory.json"));
        assert!(config.load_on_start);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "load_on_start = \"sometimes\"\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(config, Err(ConfigError::Read { .. })));

        let fallback = AppConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(fallback.currency_symbol, AppConfig::default().currency_symbol);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("STOCKROOM_INVENTORY_FILE", "/data/stock.json"),
            ("STOCKROOM_CURRENCY_SYMBOL", "€"),
            ("STOCKROOM_LOAD_ON_START", "no"),
        ]));

        assert_eq!(config.inventory_file, PathBuf::from("/data/stock.json"));
        assert_eq!(config.currency_symbol, "€");
        assert!(!config.load_on_start);
    }

    #[test]
    fn test_unknown_load_flag_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("STOCKROOM_LOAD_ON_START", "maybe")]));
        assert!(config.load_on_start);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("inventory_file = \"inventory.json\""));
        assert!(toml_str.contains("currency_symbol = \"Rs.\""));
    }
}
