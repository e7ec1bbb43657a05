//! core::event
//!
//! Domain events and their persisted form.
//!
//! # Event Categories
//!
//! Domain events come from the analysis (quality gate changes, quality
//! profile changes) and carry an [`EventCategory`]. Once persisted, the
//! category is stored as a string code:
//!
//! - `Alert`: quality gate status changed
//! - `Profile`: quality profile changed
//! - `Version`: the component's version was recorded at this analysis
//!
//! `Version` records are never produced by the event source; they are
//! derived from the version declared in the analysis report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{ComponentUuid, EventId, SnapshotId};

/// Stored category code for quality gate events.
pub const CATEGORY_ALERT: &str = "Alert";

/// Stored category code for quality profile events.
pub const CATEGORY_PROFILE: &str = "Profile";

/// Stored category code for version events.
pub const CATEGORY_VERSION: &str = "Version";

/// Category of a domain event.
///
/// Categories the persistence layer does not know about are kept as
/// [`EventCategory::Other`] so they can be rejected explicitly rather than
/// lost while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Alert,
    Profile,
    Other(String),
}

impl EventCategory {
    /// The category name as it appears in reports.
    pub fn name(&self) -> &str {
        match self {
            EventCategory::Alert => "ALERT",
            EventCategory::Profile => "PROFILE",
            EventCategory::Other(name) => name,
        }
    }
}

impl From<String> for EventCategory {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ALERT" => EventCategory::Alert,
            "PROFILE" => EventCategory::Profile,
            _ => EventCategory::Other(name),
        }
    }
}

impl From<&str> for EventCategory {
    fn from(name: &str) -> Self {
        EventCategory::from(name.to_string())
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An event attached to a component by the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub name: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque payload, copied to storage as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl DomainEvent {
    /// Create a quality gate event.
    pub fn alert(name: impl Into<String>) -> Self {
        Self::new(name, EventCategory::Alert)
    }

    /// Create a quality profile event.
    pub fn profile(name: impl Into<String>) -> Self {
        Self::new(name, EventCategory::Profile)
    }

    pub fn new(name: impl Into<String>, category: EventCategory) -> Self {
        Self {
            name: name.into(),
            category,
            description: None,
            data: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// The durable form of an event, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub component_uuid: ComponentUuid,
    pub snapshot_id: SnapshotId,
    /// Wall-clock time the record was built.
    pub created_at: DateTime<Utc>,
    /// Logical event date: the analysis date of the run.
    pub date: DateTime<Utc>,
    /// Stored category code, see the `CATEGORY_*` constants.
    pub category: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl EventRecord {
    /// Whether this is a version event named `version`.
    pub fn is_version(&self, version: &str) -> bool {
        self.category == CATEGORY_VERSION && self.name == version
    }
}

/// A persisted event together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: EventId,
    #[serde(flatten)]
    pub record: EventRecord,
}
