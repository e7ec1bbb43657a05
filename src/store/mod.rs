//! store
//!
//! Durable storage for persisted events.
//!
//! # Modules
//!
//! - [`memory`] - In-memory store with failure injection, for tests
//! - [`file`] - JSON file store with OS-level locking and atomic commit
//!
//! # Sessions
//!
//! All reads and writes go through an [`EventSession`] opened from an
//! [`EventStore`]. A session works on its own copy of the table:
//!
//! - Reads see the session's own uncommitted writes
//! - [`EventSession::commit`] publishes every write made so far at once
//! - Dropping a session closes it; uncommitted writes are discarded
//! - With `autocommit`, every write is committed as soon as it succeeds
//!
//! # Example
//!
//! ```
//! use analysis_events::store::{EventSession, EventStore, MemoryEventStore};
//! use analysis_events::core::types::ComponentUuid;
//!
//! let store = MemoryEventStore::new();
//! let mut session = store.open_session(false).unwrap();
//! let uuid = ComponentUuid::new("P").unwrap();
//! assert!(session.select_by_component_uuid(&uuid).unwrap().is_empty());
//! ```

pub mod file;
pub mod memory;

pub use file::FileEventStore;
pub use memory::{FailOn, MemoryEventStore, StoreOperation};

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::event::{EventRecord, StoredEvent};
use crate::core::types::{ComponentUuid, EventId};

/// Errors from event store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the event table.
    #[error("failed to serialize events: {0}")]
    Serialize(String),

    /// Failed to deserialize the event table.
    #[error("failed to deserialize events: {0}")]
    Deserialize(String),

    /// Another session holds the store.
    #[error("event store '{0}' is locked by another session")]
    Locked(PathBuf),

    /// No event with this id exists.
    #[error("event {0} not found")]
    NotFound(EventId),

    /// Failure injected by a test store.
    #[error("injected failure: {0}")]
    Injected(String),
}

/// A unit of work against an event store.
pub trait EventSession {
    /// All events of a component, ordered by id.
    fn select_by_component_uuid(
        &mut self,
        uuid: &ComponentUuid,
    ) -> Result<Vec<StoredEvent>, StoreError>;

    /// Insert a record and return its new id.
    fn insert(&mut self, record: EventRecord) -> Result<EventId, StoreError>;

    /// Delete the event with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such event exists.
    fn delete(&mut self, id: EventId) -> Result<(), StoreError>;

    /// Publish all writes made in this session.
    ///
    /// The session stays usable after a commit.
    fn commit(&mut self) -> Result<(), StoreError>;
}

/// A store sessions can be opened on.
pub trait EventStore {
    /// Open a session. Close it by dropping it.
    fn open_session(&self, autocommit: bool) -> Result<Box<dyn EventSession + '_>, StoreError>;
}

/// The table of persisted events, as a session sees it.
///
/// Ids are assigned from a monotonically increasing counter and are never
/// reused, even after deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventTable {
    next_id: u64,
    events: BTreeMap<EventId, EventRecord>,
}

impl Default for EventTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            events: BTreeMap::new(),
        }
    }
}

impl EventTable {
    /// Rebuild a table from its stored parts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Deserialize` on duplicate ids or ids not below
    /// `next_id`.
    pub(crate) fn from_parts(next_id: u64, events: Vec<StoredEvent>) -> Result<Self, StoreError> {
        let mut table = BTreeMap::new();
        for stored in events {
            if stored.id.get() >= next_id {
                return Err(StoreError::Deserialize(format!(
                    "event id {} is not below next_id {}",
                    stored.id, next_id
                )));
            }
            if table.insert(stored.id, stored.record).is_some() {
                return Err(StoreError::Deserialize(format!(
                    "duplicate event id {}",
                    stored.id
                )));
            }
        }
        Ok(Self {
            next_id,
            events: table,
        })
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    /// All events, ordered by id.
    pub(crate) fn all(&self) -> Vec<StoredEvent> {
        self.events
            .iter()
            .map(|(id, record)| StoredEvent {
                id: *id,
                record: record.clone(),
            })
            .collect()
    }

    pub(crate) fn select_by_component_uuid(&self, uuid: &ComponentUuid) -> Vec<StoredEvent> {
        self.events
            .iter()
            .filter(|(_, record)| &record.component_uuid == uuid)
            .map(|(id, record)| StoredEvent {
                id: *id,
                record: record.clone(),
            })
            .collect()
    }

    pub(crate) fn insert(&mut self, record: EventRecord) -> EventId {
        let id = EventId::new(self.next_id);
        self.next_id += 1;
        self.events.insert(id, record);
        id
    }

    pub(crate) fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        self.events
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}
