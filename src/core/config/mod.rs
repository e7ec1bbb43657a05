//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! aevents has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Settings for the project directory the command runs in
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$AEVENTS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/aevents/config.toml`
//! 3. `~/.aevents/config.toml`
//!
//! # Project Config Location
//!
//! `.aevents/config.toml` under the project directory.
//!
//! # Example
//!
//! ```no_run
//! use analysis_events::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! println!("Store: {}", config.store_path().display());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LogConfig, ProjectConfig, StoreConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default event store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "events.json";

/// Default log filter when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project config overrides
/// global config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads its project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = Self::load_global()?;
        Self::assemble(global, global_path, project_dir)
    }

    /// Load configuration with an explicit global config file.
    ///
    /// Used for `--config`; unlike the searched locations, the file must
    /// exist.
    pub fn load_with_global(
        global_path: &Path,
        project_dir: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        if !global_path.exists() {
            return Err(ConfigError::NotFound(global_path.to_path_buf()));
        }
        let global: GlobalConfig = Self::read_config(global_path)?;
        Self::assemble(global, Some(global_path.to_path_buf()), project_dir)
    }

    fn assemble(
        global: GlobalConfig,
        global_path: Option<PathBuf>,
        project_dir: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let (project, project_path) = match project_dir {
            Some(dir) => Self::load_project(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config {
            global,
            project,
            global_path,
            project_path,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $AEVENTS_CONFIG
        if let Ok(path) = std::env::var("AEVENTS_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/aevents/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("aevents/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.aevents/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".aevents/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_project(
        project_dir: &Path,
    ) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::project_config_path(project_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the project config file under `project_dir`.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".aevents/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Path of the event store file.
    ///
    /// Defaults to `events.json` if not configured.
    pub fn store_path(&self) -> PathBuf {
        let project = self
            .project
            .as_ref()
            .and_then(|p| p.store.as_ref())
            .and_then(|s| s.path.as_deref());
        let global = self.global.store.as_ref().and_then(|s| s.path.as_deref());

        PathBuf::from(project.or(global).unwrap_or(DEFAULT_STORE_PATH))
    }

    /// Configured log filter, if any.
    pub fn log_filter(&self) -> Option<&str> {
        let project = self
            .project
            .as_ref()
            .and_then(|p| p.log.as_ref())
            .and_then(|l| l.filter.as_deref());
        let global = self.global.log.as_ref().and_then(|l| l.filter.as_deref());

        project.or(global)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
