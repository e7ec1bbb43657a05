//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its inputs (flags over config)
//! 2. Calls the engine or the store
//! 3. Formats and displays output
//!
//! Handlers do NOT write to the store directly; `persist` goes through
//! [`crate::engine::PersistEventsStep`].

mod completion;
mod events;
mod persist;

pub use completion::completion;
pub use events::events;
pub use persist::persist;

use super::args::Command;
use super::Context;
use anyhow::Result;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Persist { report, store } => persist::persist(ctx, &report, store),
        Command::Events {
            component,
            store,
            json,
        } => events::events(ctx, &component, store, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
