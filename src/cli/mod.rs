//! cli
//!
//! Command-line interface layer for aevents.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, wires the concrete
//! collaborators (JSON report, file store, system clock) and hands them to
//! the [`crate::engine`] steps. All store writes flow through the engine.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, DEFAULT_LOG_FILTER};
use crate::ui::output::Verbosity;

/// Execution context shared by command handlers.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration.
    pub config: Config,
    /// Output verbosity from `--quiet` / `--debug`.
    pub verbosity: Verbosity,
}

impl Context {
    /// Store path to use: the explicit flag, else the configured one.
    pub fn store_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.config.store_path())
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Completion output must not depend on a readable config
    if let Command::Completion { shell } = cli.command {
        return commands::completion(shell);
    }

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_with_global(path, Some(cwd.as_path())),
        None => Config::load(Some(cwd.as_path())),
    }
    .context("failed to load configuration")?;

    let env_filter = std::env::var("RUST_LOG").ok();
    init_logging(&resolve_log_filter(
        cli.debug,
        env_filter.as_deref(),
        config.log_filter(),
    ));
    if let Some(path) = config.global_config_loaded_from() {
        tracing::debug!(path = %path.display(), "loaded global config");
    }
    if let Some(path) = config.project_config_loaded_from() {
        tracing::debug!(path = %path.display(), "loaded project config");
    }

    let ctx = Context {
        config,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Pick the log filter directive.
///
/// `--debug` wins over `RUST_LOG`, which wins over the configured filter.
/// Blank values are ignored.
pub fn resolve_log_filter(debug: bool, env: Option<&str>, configured: Option<&str>) -> String {
    if debug {
        return "debug".to_string();
    }
    env.filter(|s| !s.trim().is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string()
}

/// Install the global tracing subscriber, writing to stderr.
///
/// An unparsable directive falls back to the default filter.
fn init_logging(directive: &str) {
    let filter =
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
