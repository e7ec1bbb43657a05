//! events
//!
//! Where the domain events of an analysis come from.
//!
//! # Design
//!
//! Events are computed upstream (quality gate evaluation, quality profile
//! comparison) and attached to components. The persistence step reads them
//! through [`EventSource`]; [`EventRepository`] is the in-memory
//! implementation that upstream stages fill.

use std::collections::HashMap;

use crate::core::component::Component;
use crate::core::event::DomainEvent;
use crate::core::types::ComponentUuid;
use crate::report::JsonReport;

/// Supplies the domain events bound to a component.
pub trait EventSource {
    /// Events attached to `component`, in no guaranteed order.
    ///
    /// A component without events yields an empty list.
    fn events(&self, component: &Component) -> Vec<DomainEvent>;
}

/// In-memory events, keyed by component uuid.
///
/// # Example
///
/// ```
/// use analysis_events::core::component::{Component, ComponentType};
/// use analysis_events::core::event::DomainEvent;
/// use analysis_events::core::types::{ComponentRef, ComponentUuid};
/// use analysis_events::events::{EventRepository, EventSource};
///
/// let file = Component::new(
///     ComponentUuid::new("F").unwrap(),
///     ComponentRef::new(3),
///     ComponentType::File,
/// );
///
/// let mut repository = EventRepository::new();
/// repository.add(file.uuid().clone(), DomainEvent::alert("Red (was Green)"));
///
/// assert_eq!(repository.events(&file).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventRepository {
    events: HashMap<ComponentUuid, Vec<DomainEvent>>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an event to a component.
    pub fn add(&mut self, component: ComponentUuid, event: DomainEvent) {
        self.events.entry(component).or_default().push(event);
    }

    /// Collect the events declared in a JSON report.
    pub fn from_report(report: &JsonReport) -> Self {
        let mut repository = Self::new();
        for component in report.components() {
            for event in &component.events {
                repository.add(component.uuid.clone(), event.clone());
            }
        }
        repository
    }

    /// Total number of events across all components.
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSource for EventRepository {
    fn events(&self, component: &Component) -> Vec<DomainEvent> {
        self.events
            .get(component.uuid())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::ComponentType;
    use crate::core::types::ComponentRef;

    fn component(uuid: &str) -> Component {
        Component::new(
            ComponentUuid::new(uuid).unwrap(),
            ComponentRef::new(1),
            ComponentType::Module,
        )
    }

    #[test]
    fn unknown_component_has_no_events() {
        let repository = EventRepository::new();
        assert!(repository.events(&component("M")).is_empty());
        assert!(repository.is_empty());
    }

    #[test]
    fn events_are_scoped_by_uuid() {
        let mut repository = EventRepository::new();
        let m = component("M");
        let n = component("N");
        repository.add(m.uuid().clone(), DomainEvent::alert("a"));
        repository.add(m.uuid().clone(), DomainEvent::profile("p"));
        repository.add(n.uuid().clone(), DomainEvent::alert("b"));

        assert_eq!(repository.events(&m).len(), 2);
        assert_eq!(repository.events(&n), vec![DomainEvent::alert("b")]);
        assert_eq!(repository.len(), 3);
    }

    #[test]
    fn from_report_collects_component_events() {
        let report = JsonReport::from_json(
            r#"{
                "metadata": { "analysis_date": "2026-01-05T10:00:00Z",
                              "project_key": "k", "root_component_ref": 1 },
                "components": [
                    { "ref": 1, "type": "PROJECT", "uuid": "P", "snapshot_id": 1,
                      "child_refs": [2],
                      "events": [ { "name": "Changes in 'Sonar way'", "category": "PROFILE" } ] },
                    { "ref": 2, "type": "FILE", "uuid": "F", "snapshot_id": 2,
                      "events": [ { "name": "Red", "category": "ALERT" },
                                  { "name": "Orange", "category": "ALERT" } ] }
                ]
            }"#,
        )
        .unwrap();

        let repository = EventRepository::from_report(&report);

        assert_eq!(repository.len(), 3);
        let file = Component::new(
            ComponentUuid::new("F").unwrap(),
            ComponentRef::new(2),
            ComponentType::File,
        );
        let names: Vec<_> = repository
            .events(&file)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Red", "Orange"]);
    }
}
