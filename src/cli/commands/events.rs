//! events command - List the stored events of a component

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::types::ComponentUuid;
use crate::store::FileEventStore;
use crate::ui::output;

/// List the committed events of `component`.
pub fn events(ctx: &Context, component: &str, store: Option<PathBuf>, json: bool) -> Result<()> {
    let uuid = ComponentUuid::new(component)?;
    let store = FileEventStore::new(ctx.store_path(store));
    let events: Vec<_> = store
        .read_all()?
        .into_iter()
        .filter(|e| e.record.component_uuid == uuid)
        .collect();

    if json {
        let rendered =
            serde_json::to_string_pretty(&events).context("failed to render events as JSON")?;
        println!("{}", rendered);
        return Ok(());
    }

    if events.is_empty() {
        output::print(format!("No events for {}", uuid), ctx.verbosity);
        return Ok(());
    }

    let lines: Vec<String> = events.iter().map(output::format_event).collect();
    output::print(output::format_list(&lines, ""), ctx.verbosity);
    Ok(())
}
