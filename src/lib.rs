//! analysis-events - Persist analysis events onto a component tree
//!
//! After an analysis, every component of the analysed project (project,
//! modules, directories, files) may carry quality gate and quality profile
//! events, and may declare a version. This crate walks the component tree
//! and writes those events durably, keeping exactly one version event per
//! component and version name.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Computation steps, including [`engine::PersistEventsStep`]
//! - [`core`] - Domain types, tree traversal, clock, and configuration
//! - [`report`] - Reading analysis reports and rebuilding the component tree
//! - [`events`] - Domain events bound to components
//! - [`store`] - Durable event storage with session semantics
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. A run commits once, after every component was processed
//! 2. A failed run leaves the store exactly as it was
//! 3. Events with an unknown category fail the run instead of being dropped
//! 4. Re-running an analysis never duplicates a component's version event

pub mod cli;
pub mod core;
pub mod engine;
pub mod events;
pub mod report;
pub mod store;
pub mod ui;
