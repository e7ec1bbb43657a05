//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Everything meant for the user (as opposed to logs) goes through this
//! module so that `--quiet` is honored in one place. Logs go to stderr via
//! `tracing`.

pub mod output;
