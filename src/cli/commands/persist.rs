//! persist command - Persist the events of an analysis report

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::clock::SystemClock;
use crate::core::component::TreeRoot;
use crate::engine::{ComputationStep, PersistEventsStep};
use crate::events::EventRepository;
use crate::report::{build_tree, JsonReport};
use crate::store::FileEventStore;
use crate::ui::output;

/// Persist the events of the report at `report_path`.
pub fn persist(ctx: &Context, report_path: &Path, store: Option<PathBuf>) -> Result<()> {
    let report = JsonReport::load(report_path)?;
    let tree = TreeRoot::new(build_tree(&report)?);
    let events = EventRepository::from_report(&report);
    let store = FileEventStore::new(ctx.store_path(store));

    output::debug(
        format!(
            "report {} for {}: {} events",
            report_path.display(),
            report.metadata().project_key,
            events.len()
        ),
        ctx.verbosity,
    );

    let step = PersistEventsStep::new(&store, &SystemClock, &tree, &report, &events);
    tracing::info!(step = step.description(), store = %store.path().display(), "running step");
    let summary = step
        .run()
        .with_context(|| format!("{} failed", step.description()))?;

    output::success(
        format!(
            "Persisted {} event(s) and {} version(s) on {} component(s) into {}",
            summary.events_inserted,
            summary.versions_inserted,
            summary.components,
            store.path().display()
        ),
        ctx.verbosity,
    );
    if summary.versions_deleted > 0 {
        output::debug(
            format!("replaced {} version event(s)", summary.versions_deleted),
            ctx.verbosity,
        );
    }
    Ok(())
}
