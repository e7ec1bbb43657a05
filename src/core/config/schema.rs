//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$AEVENTS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/aevents/config.toml`
//! 3. `~/.aevents/config.toml`
//!
//! # Project Config
//!
//! Located at `.aevents/config.toml` in the project directory.
//!
//! # Validation
//!
//! Config values are validated after parsing: paths and filters must be
//! non-empty, and log filters must parse as `tracing` directives.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [store]
/// path = "/var/lib/aevents/events.json"
///
/// [log]
/// filter = "analysis_events=debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Event store settings
    pub store: Option<StoreConfig>,

    /// Logging settings
    pub log: Option<LogConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.store {
            store.validate()?;
        }
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Project configuration.
///
/// Same keys as [`GlobalConfig`]; values set here win.
///
/// # Example
///
/// ```toml
/// [store]
/// path = "build/events.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Event store settings
    pub store: Option<StoreConfig>,

    /// Logging settings
    pub log: Option<LogConfig>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.store {
            store.validate()?;
        }
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Event store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Path of the JSON event store file
    pub path: Option<String>,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store.path cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"analysis_events=debug"`
    pub filter: Option<String>,
}

impl LogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(filter) = &self.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "log.filter cannot be empty".into(),
                ));
            }
            EnvFilter::try_new(filter).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid log.filter '{}': {}", filter, e))
            })?;
        }
        Ok(())
    }
}
