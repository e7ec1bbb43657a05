//! store::file
//!
//! Event store backed by a single JSON file.
//!
//! # Storage
//!
//! - `<path>` - Pretty-printed JSON: `{ "next_id": n, "events": [...] }`
//! - `<path>.lock` - Lock file with OS-level exclusive lock
//!
//! A missing store file is an empty store.
//!
//! # Invariants
//!
//! - At most one session is open on a store file at a time; the lock is
//!   held for the whole session and released on drop
//! - Lock acquisition is non-blocking (fails fast if locked)
//! - Commits are atomic (write to temp file, sync, then rename)

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::{EventSession, EventStore, EventTable, StoreError};
use crate::core::event::{EventRecord, StoredEvent};
use crate::core::types::{ComponentUuid, EventId};

/// On-disk layout of the store file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreFile {
    next_id: u64,
    events: Vec<StoredEvent>,
}

/// File-backed event store.
///
/// # Example
///
/// ```no_run
/// use analysis_events::store::{EventSession, EventStore, FileEventStore};
/// use std::path::PathBuf;
///
/// let store = FileEventStore::new(PathBuf::from("events.json"));
/// let mut session = store.open_session(false)?;
/// // ... select / insert / delete ...
/// session.commit()?;
/// # Ok::<(), analysis_events::store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileEventStore {
    path: PathBuf,
}

impl FileEventStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar lock file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Read all committed events without opening a session.
    ///
    /// Does not take the lock; a concurrent commit is either fully visible
    /// or not at all because commits rename into place.
    pub fn read_all(&self) -> Result<Vec<StoredEvent>, StoreError> {
        Ok(self.read_table()?.all())
    }

    fn read_table(&self) -> Result<EventTable, StoreError> {
        if !self.path.exists() {
            return Ok(EventTable::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let file: StoreFile =
            serde_json::from_str(&contents).map_err(|e| StoreError::Deserialize(e.to_string()))?;
        EventTable::from_parts(file.next_id, file.events)
    }

    fn write_table(&self, table: &EventTable) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let file = StoreFile {
            next_id: table.next_id(),
            events: table.all(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        // Write to a temp file in the same directory for atomic rename
        let mut temp_name = OsString::from(self.path.as_os_str());
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        {
            let mut temp = File::create(&temp_path).map_err(|e| StoreError::Io {
                path: temp_path.clone(),
                source: e,
            })?;
            temp.write_all(json.as_bytes())
                .map_err(|e| StoreError::Io {
                    path: temp_path.clone(),
                    source: e,
                })?;
            temp.sync_all().map_err(|e| StoreError::Io {
                path: temp_path.clone(),
                source: e,
            })?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn acquire_lock(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StoreError::Io {
                path: lock_path.clone(),
                source: e,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Err(StoreError::Locked(self.path.clone()))
            }
            Err(e) => Err(StoreError::Io {
                path: lock_path,
                source: e,
            }),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl EventStore for FileEventStore {
    fn open_session(&self, autocommit: bool) -> Result<Box<dyn EventSession + '_>, StoreError> {
        let lock = self.acquire_lock()?;
        let working = self.read_table()?;
        tracing::debug!(path = %self.path.display(), events = working.len(), "opened event store session");
        Ok(Box::new(FileSession {
            store: self,
            working,
            autocommit,
            lock: Some(lock),
        }))
    }
}

/// A session on a [`FileEventStore`], holding its lock.
struct FileSession<'a> {
    store: &'a FileEventStore,
    working: EventTable,
    autocommit: bool,
    lock: Option<File>,
}

impl EventSession for FileSession<'_> {
    fn select_by_component_uuid(
        &mut self,
        uuid: &ComponentUuid,
    ) -> Result<Vec<StoredEvent>, StoreError> {
        Ok(self.working.select_by_component_uuid(uuid))
    }

    fn insert(&mut self, record: EventRecord) -> Result<EventId, StoreError> {
        let id = self.working.insert(record);
        if self.autocommit {
            self.commit()?;
        }
        Ok(id)
    }

    fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        self.working.delete(id)?;
        if self.autocommit {
            self.commit()?;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.store.write_table(&self.working)?;
        tracing::debug!(path = %self.store.path.display(), events = self.working.len(), "committed event store");
        Ok(())
    }
}

impl Drop for FileSession<'_> {
    fn drop(&mut self) {
        // Best-effort release on drop - ignore errors since we're dropping
        if let Some(file) = self.lock.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}
