//! core
//!
//! Core domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ComponentUuid, ComponentRef, SnapshotId, EventId
//! - [`component`] - Component tree and component types
//! - [`walker`] - Depth-first, type-limited traversal of the tree
//! - [`event`] - Domain events and their persisted form
//! - [`clock`] - Time source abstraction
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Nothing in `core` performs I/O except config loading

pub mod clock;
pub mod component;
pub mod config;
pub mod event;
pub mod types;
pub mod walker;
