//! engine
//!
//! Computation steps run over an analysis.
//!
//! # Architecture
//!
//! A step is built from the collaborators it needs (report reader, component
//! tree, event source, store, clock), all passed as trait objects, and run
//! through [`ComputationStep::execute`]. Steps hold no state between runs.
//!
//! - [`step`] - The step trait and its error type
//! - [`persist_events`] - Writes analysis events onto the component tree
//!
//! # Example
//!
//! ```ignore
//! use analysis_events::engine::{ComputationStep, PersistEventsStep};
//!
//! let step = PersistEventsStep::new(&store, &clock, &tree, &report, &events);
//! tracing::info!(step = step.description(), "running step");
//! step.execute()?;
//! ```

pub mod persist_events;
pub mod step;

pub use persist_events::{PersistEventsStep, PersistSummary};
pub use step::{ComputationStep, StepError};
