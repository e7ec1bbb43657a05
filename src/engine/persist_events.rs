//! engine::persist_events
//!
//! Persists the events of an analysis onto its component tree.
//!
//! # Algorithm
//!
//! One store session is opened for the whole run. The component tree is
//! walked pre-order down to files, and for each component:
//!
//! 1. Every domain event of the component is converted to an
//!    [`EventRecord`] and inserted.
//! 2. If the report declares a version for the component, existing
//!    `Version` events of that component with the *same* name are deleted
//!    and one new `Version` event is inserted.
//!
//! The session is committed once, after the whole tree was processed. Any
//! error stops the walk and returns without committing.
//!
//! # Invariants
//!
//! - After a component is processed, it has exactly one `Version` event
//!   named after its declared version
//! - `Version` events with other names are never touched
//! - Every record of a run carries the run's analysis date as its date
//! - A category outside the known table fails the run; events are never
//!   silently dropped

use chrono::{DateTime, Utc};

use super::{ComputationStep, StepError};
use crate::core::clock::Clock;
use crate::core::component::{Component, TreeRootHolder};
use crate::core::event::{
    DomainEvent, EventCategory, EventRecord, CATEGORY_ALERT, CATEGORY_PROFILE, CATEGORY_VERSION,
};
use crate::core::types::{ComponentUuid, SnapshotId};
use crate::core::walker::DepthTraversal;
use crate::events::EventSource;
use crate::report::{ReportComponent, ReportReader};
use crate::store::{EventSession, EventStore};

/// Counts of what one run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistSummary {
    pub components: usize,
    pub events_inserted: usize,
    pub versions_inserted: usize,
    pub versions_deleted: usize,
}

/// Fields shared by every record written for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub component_uuid: ComponentUuid,
    pub snapshot_id: SnapshotId,
    pub analysis_date: DateTime<Utc>,
}

impl EventContext {
    /// A record carrying this context, created now.
    fn base_record(
        &self,
        clock: &dyn Clock,
        category: &str,
        name: impl Into<String>,
    ) -> EventRecord {
        EventRecord {
            component_uuid: self.component_uuid.clone(),
            snapshot_id: self.snapshot_id,
            created_at: clock.now(),
            date: self.analysis_date,
            category: category.to_string(),
            name: name.into(),
            description: None,
            data: None,
        }
    }
}

/// State threaded through one run.
struct Run<'s> {
    session: Box<dyn EventSession + 's>,
    analysis_date: DateTime<Utc>,
    summary: PersistSummary,
}

/// Stored category code for a domain event category.
///
/// # Errors
///
/// Returns `StepError::UnsupportedCategory` for any category outside the
/// table. This is a programming error upstream, not bad input.
pub fn convert_category(category: &EventCategory) -> Result<&'static str, StepError> {
    match category {
        EventCategory::Alert => Ok(CATEGORY_ALERT),
        EventCategory::Profile => Ok(CATEGORY_PROFILE),
        EventCategory::Other(name) => Err(StepError::UnsupportedCategory(name.clone())),
    }
}

/// Convert a domain event into a record for the given component context.
///
/// Name, description and data are copied verbatim; the creation timestamp
/// is read from `clock` on each call.
pub fn to_event_record(
    event: &DomainEvent,
    context: &EventContext,
    clock: &dyn Clock,
) -> Result<EventRecord, StepError> {
    let category = convert_category(&event.category)?;
    let mut record = context.base_record(clock, category, event.name.clone());
    record.description = event.description.clone();
    record.data = event.data.clone();
    Ok(record)
}

/// The "persist events" computation step.
///
/// # Example
///
/// ```
/// use analysis_events::core::clock::SystemClock;
/// use analysis_events::core::component::TreeRoot;
/// use analysis_events::engine::{ComputationStep, PersistEventsStep};
/// use analysis_events::events::EventRepository;
/// use analysis_events::report::{build_tree, JsonReport};
/// use analysis_events::store::MemoryEventStore;
///
/// let report = JsonReport::from_json(r#"{
///     "metadata": { "analysis_date": "2026-01-05T10:00:00Z",
///                   "project_key": "k", "root_component_ref": 1 },
///     "components": [
///         { "ref": 1, "type": "PROJECT", "uuid": "P", "version": "1.0", "snapshot_id": 7 }
///     ]
/// }"#).unwrap();
/// let tree = TreeRoot::new(build_tree(&report).unwrap());
/// let events = EventRepository::from_report(&report);
/// let store = MemoryEventStore::new();
///
/// let step = PersistEventsStep::new(&store, &SystemClock, &tree, &report, &events);
/// step.execute().unwrap();
///
/// assert_eq!(store.events().len(), 1);
/// assert_eq!(store.events()[0].record.name, "1.0");
/// ```
pub struct PersistEventsStep<'a> {
    store: &'a dyn EventStore,
    clock: &'a dyn Clock,
    tree: &'a dyn TreeRootHolder,
    reports: &'a dyn ReportReader,
    events: &'a dyn EventSource,
}

impl<'a> PersistEventsStep<'a> {
    pub fn new(
        store: &'a dyn EventStore,
        clock: &'a dyn Clock,
        tree: &'a dyn TreeRootHolder,
        reports: &'a dyn ReportReader,
        events: &'a dyn EventSource,
    ) -> Self {
        Self {
            store,
            clock,
            tree,
            reports,
            events,
        }
    }

    /// Run the step and report what was written.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while processing a component, or
    /// while committing. Nothing is committed in that case.
    pub fn run(&self) -> Result<PersistSummary, StepError> {
        let analysis_date = self.reports.read_metadata()?.analysis_date;
        let mut run = Run {
            session: self.store.open_session(false)?,
            analysis_date,
            summary: PersistSummary::default(),
        };

        let walked = DepthTraversal::pre_order()
            .walk(self.tree.root(), |component| {
                self.process_component(&mut run, component)
            });
        if let Err(e) = walked {
            tracing::warn!(error = %e, fatal = e.is_fatal(), "persisting events aborted, nothing committed");
            return Err(e);
        }

        run.session.commit()?;
        tracing::info!(
            components = run.summary.components,
            events = run.summary.events_inserted,
            versions = run.summary.versions_inserted,
            "persisted analysis events"
        );
        Ok(run.summary)
    }

    fn process_component(&self, run: &mut Run<'_>, component: &Component) -> Result<(), StepError> {
        let report_component = self.reports.read_component(component.report_ref())?;
        let context = EventContext {
            component_uuid: component.uuid().clone(),
            snapshot_id: report_component.snapshot_id,
            analysis_date: run.analysis_date,
        };
        tracing::debug!(
            uuid = %component.uuid(),
            kind = %component.kind(),
            "persisting events of component"
        );

        self.process_events(run, &context, component)?;
        self.save_version_event(run, &context, &report_component)?;
        run.summary.components += 1;
        Ok(())
    }

    fn process_events(
        &self,
        run: &mut Run<'_>,
        context: &EventContext,
        component: &Component,
    ) -> Result<(), StepError> {
        for event in self.events.events(component) {
            let record = to_event_record(&event, context, self.clock)?;
            run.session.insert(record)?;
            run.summary.events_inserted += 1;
        }
        Ok(())
    }

    fn save_version_event(
        &self,
        run: &mut Run<'_>,
        context: &EventContext,
        report_component: &ReportComponent,
    ) -> Result<(), StepError> {
        let Some(version) = report_component.version() else {
            return Ok(());
        };

        self.delete_previous_events_having_same_version(run, context, version)?;
        let record = context.base_record(self.clock, CATEGORY_VERSION, version);
        run.session.insert(record)?;
        run.summary.versions_inserted += 1;
        Ok(())
    }

    fn delete_previous_events_having_same_version(
        &self,
        run: &mut Run<'_>,
        context: &EventContext,
        version: &str,
    ) -> Result<(), StepError> {
        let existing = run
            .session
            .select_by_component_uuid(&context.component_uuid)?;
        for stored in existing {
            if stored.record.is_version(version) {
                tracing::debug!(
                    uuid = %context.component_uuid,
                    version,
                    id = %stored.id,
                    "replacing version event"
                );
                run.session.delete(stored.id)?;
                run.summary.versions_deleted += 1;
            }
        }
        Ok(())
    }
}

impl ComputationStep for PersistEventsStep<'_> {
    fn execute(&self) -> Result<(), StepError> {
        self.run().map(|_| ())
    }

    fn description(&self) -> &'static str {
        "Persist events"
    }
}
