//! store::memory
//!
//! In-memory event store for deterministic testing.
//!
//! # Design
//!
//! The store keeps the committed table behind an `Arc<Mutex<...>>` so that
//! clones observe the same state. Sessions copy the committed table when
//! opened and replace it on commit. Every session call is recorded as a
//! [`StoreOperation`], and a [`FailOn`] can be configured to exercise error
//! paths.
//!
//! Concurrent sessions are not coordinated: the last commit wins.
//!
//! # Example
//!
//! ```
//! use analysis_events::store::{EventSession, EventStore, FailOn, MemoryEventStore, StoreError};
//!
//! let store = MemoryEventStore::new();
//! store.fail_on(FailOn::Commit);
//!
//! let mut session = store.open_session(false).unwrap();
//! assert!(matches!(session.commit(), Err(StoreError::Injected(_))));
//! assert_eq!(store.commit_count(), 0);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use super::{EventSession, EventStore, EventTable, StoreError};
use crate::core::event::{EventRecord, StoredEvent};
use crate::core::types::{ComponentUuid, EventId};

/// In-memory event store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// Committed state.
    table: EventTable,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<StoreOperation>,
    /// Number of successful commits.
    commits: usize,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// Fail every select.
    Select,
    /// Fail every insert.
    Insert,
    /// Fail inserts of records with this name.
    InsertNamed(String),
    /// Fail every delete.
    Delete,
    /// Fail every commit.
    Commit,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    OpenSession {
        autocommit: bool,
    },
    Select {
        uuid: ComponentUuid,
    },
    Insert {
        uuid: ComponentUuid,
        category: String,
        name: String,
    },
    Delete {
        id: EventId,
    },
    Commit,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-existing committed events.
    ///
    /// Ids are assigned in order starting at 1.
    pub fn with_events(records: impl IntoIterator<Item = EventRecord>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for record in records {
                inner.table.insert(record);
            }
        }
        store
    }

    /// Make the given operation fail from now on.
    pub fn fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    /// All committed events, ordered by id.
    pub fn events(&self) -> Vec<StoredEvent> {
        self.lock().table.all()
    }

    /// Committed events of one component, ordered by id.
    pub fn events_for(&self, uuid: &ComponentUuid) -> Vec<StoredEvent> {
        self.lock().table.select_by_component_uuid(uuid)
    }

    /// Operations recorded so far, in call order.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.lock().operations.clone()
    }

    /// Number of successful commits.
    pub fn commit_count(&self) -> usize {
        self.lock().commits
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        // A poisoned lock only means a test panicked mid-operation; the
        // table itself is always left consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventStore for MemoryEventStore {
    fn open_session(&self, autocommit: bool) -> Result<Box<dyn EventSession + '_>, StoreError> {
        let working = {
            let mut inner = self.lock();
            inner
                .operations
                .push(StoreOperation::OpenSession { autocommit });
            inner.table.clone()
        };
        Ok(Box::new(MemorySession {
            store: self.clone(),
            working,
            autocommit,
        }))
    }
}

/// A session on a [`MemoryEventStore`].
#[derive(Debug)]
struct MemorySession {
    store: MemoryEventStore,
    working: EventTable,
    autocommit: bool,
}

impl MemorySession {
    /// Record `operation` and return the injected failure, if it applies.
    fn record(&self, operation: StoreOperation) -> Result<(), StoreError> {
        let mut inner = self.store.lock();
        let injected = match (&inner.fail_on, &operation) {
            (Some(FailOn::Select), StoreOperation::Select { .. }) => Some("select"),
            (Some(FailOn::Insert), StoreOperation::Insert { .. }) => Some("insert"),
            (Some(FailOn::InsertNamed(target)), StoreOperation::Insert { name, .. })
                if target == name =>
            {
                Some("insert")
            }
            (Some(FailOn::Delete), StoreOperation::Delete { .. }) => Some("delete"),
            (Some(FailOn::Commit), StoreOperation::Commit) => Some("commit"),
            _ => None,
        };
        inner.operations.push(operation);
        match injected {
            Some(what) => Err(StoreError::Injected(format!("{} failed", what))),
            None => Ok(()),
        }
    }

    fn publish(&mut self) {
        let mut inner = self.store.lock();
        inner.table = self.working.clone();
        inner.commits += 1;
    }
}

impl EventSession for MemorySession {
    fn select_by_component_uuid(
        &mut self,
        uuid: &ComponentUuid,
    ) -> Result<Vec<StoredEvent>, StoreError> {
        self.record(StoreOperation::Select { uuid: uuid.clone() })?;
        Ok(self.working.select_by_component_uuid(uuid))
    }

    fn insert(&mut self, record: EventRecord) -> Result<EventId, StoreError> {
        self.record(StoreOperation::Insert {
            uuid: record.component_uuid.clone(),
            category: record.category.clone(),
            name: record.name.clone(),
        })?;
        let id = self.working.insert(record);
        if self.autocommit {
            self.publish();
        }
        Ok(id)
    }

    fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        self.record(StoreOperation::Delete { id })?;
        self.working.delete(id)?;
        if self.autocommit {
            self.publish();
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.record(StoreOperation::Commit)?;
        self.publish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{CATEGORY_ALERT, CATEGORY_VERSION};
    use crate::core::types::SnapshotId;
    use chrono::{TimeZone, Utc};

    fn record(uuid: &str, category: &str, name: &str) -> EventRecord {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap();
        EventRecord {
            component_uuid: ComponentUuid::new(uuid).unwrap(),
            snapshot_id: SnapshotId::new(1),
            created_at: date,
            date,
            category: category.to_string(),
            name: name.to_string(),
            description: None,
            data: None,
        }
    }

    fn uuid(s: &str) -> ComponentUuid {
        ComponentUuid::new(s).unwrap()
    }

    #[test]
    fn session_sees_own_writes_before_commit() {
        let store = MemoryEventStore::new();
        let mut session = store.open_session(false).unwrap();

        session.insert(record("P", CATEGORY_ALERT, "a")).unwrap();

        assert_eq!(session.select_by_component_uuid(&uuid("P")).unwrap().len(), 1);
        assert!(store.events().is_empty());
    }

    #[test]
    fn commit_publishes_writes() {
        let store = MemoryEventStore::with_events(vec![record("P", CATEGORY_VERSION, "1.0")]);
        let mut session = store.open_session(false).unwrap();

        session.delete(EventId::new(1)).unwrap();
        session.insert(record("P", CATEGORY_VERSION, "1.0")).unwrap();
        session.commit().unwrap();

        let events = store.events_for(&uuid("P"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, EventId::new(2));
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn dropping_session_discards_writes() {
        let store = MemoryEventStore::new();
        {
            let mut session = store.open_session(false).unwrap();
            session.insert(record("P", CATEGORY_ALERT, "a")).unwrap();
        }
        assert!(store.events().is_empty());
    }

    #[test]
    fn autocommit_publishes_each_write() {
        let store = MemoryEventStore::new();
        let mut session = store.open_session(true).unwrap();

        session.insert(record("P", CATEGORY_ALERT, "a")).unwrap();
        assert_eq!(store.events().len(), 1);

        session.delete(EventId::new(1)).unwrap();
        assert!(store.events().is_empty());
    }

    #[test]
    fn injected_insert_failure_by_name() {
        let store = MemoryEventStore::new();
        store.fail_on(FailOn::InsertNamed("bad".into()));
        let mut session = store.open_session(false).unwrap();

        assert!(session.insert(record("P", CATEGORY_ALERT, "good")).is_ok());
        assert!(matches!(
            session.insert(record("P", CATEGORY_ALERT, "bad")),
            Err(StoreError::Injected(_))
        ));
        // The failed insert did not reach the working table
        assert_eq!(session.select_by_component_uuid(&uuid("P")).unwrap().len(), 1);

        store.clear_failure();
        assert!(session.insert(record("P", CATEGORY_ALERT, "bad")).is_ok());
    }

    #[test]
    fn operations_are_recorded_in_order() {
        let store = MemoryEventStore::new();
        let mut session = store.open_session(false).unwrap();
        session.select_by_component_uuid(&uuid("P")).unwrap();
        session.insert(record("P", CATEGORY_ALERT, "a")).unwrap();
        session.commit().unwrap();

        assert_eq!(
            store.operations(),
            vec![
                StoreOperation::OpenSession { autocommit: false },
                StoreOperation::Select { uuid: uuid("P") },
                StoreOperation::Insert {
                    uuid: uuid("P"),
                    category: CATEGORY_ALERT.to_string(),
                    name: "a".to_string(),
                },
                StoreOperation::Commit,
            ]
        );
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryEventStore::new();
        let clone = store.clone();
        let mut session = store.open_session(true).unwrap();
        session.insert(record("P", CATEGORY_ALERT, "a")).unwrap();
        assert_eq!(clone.events().len(), 1);
    }
}
