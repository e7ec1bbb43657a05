//! report
//!
//! Access to the analysis report the events are persisted from.
//!
//! # Modules
//!
//! - [`json`] - JSON report file reader
//! - [`tree`] - Builds the component tree from a report
//!
//! # Design
//!
//! The persistence step only needs two things from a report: the run's
//! metadata and one record per component, looked up by [`ComponentRef`].
//! [`ReportReader`] is that seam; how the report is stored is up to the
//! implementation.

pub mod json;
pub mod tree;

pub use json::JsonReport;
pub use tree::build_tree;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::component::ComponentType;
use crate::core::event::DomainEvent;
use crate::core::types::{ComponentRef, ComponentUuid, SnapshotId};

/// Errors from reading an analysis report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("failed to read report '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The report could not be parsed.
    #[error("failed to parse report: {0}")]
    Parse(String),

    /// No record exists for the requested component.
    #[error("component {0} not found in report")]
    ComponentNotFound(ComponentRef),

    /// The report is structurally invalid.
    #[error("malformed report: {0}")]
    Malformed(String),
}

/// Run-level metadata of an analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the analysis ran. Every event persisted for the run carries
    /// this as its logical date.
    pub analysis_date: DateTime<Utc>,
    pub project_key: String,
    pub root_component_ref: ComponentRef,
}

/// Per-component record of an analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportComponent {
    #[serde(rename = "ref")]
    pub component_ref: ComponentRef,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub uuid: ComponentUuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub snapshot_id: SnapshotId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_refs: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DomainEvent>,
}

impl ReportComponent {
    /// The declared version, if present and non-empty.
    ///
    /// ```
    /// use analysis_events::core::component::ComponentType;
    /// use analysis_events::core::types::{ComponentRef, ComponentUuid, SnapshotId};
    /// use analysis_events::report::ReportComponent;
    ///
    /// let mut component = ReportComponent::new(
    ///     ComponentRef::new(1),
    ///     ComponentType::Project,
    ///     ComponentUuid::new("P").unwrap(),
    ///     SnapshotId::new(10),
    /// );
    /// assert_eq!(component.version(), None);
    ///
    /// component.version = Some(String::new());
    /// assert_eq!(component.version(), None);
    ///
    /// component.version = Some("1.0".into());
    /// assert_eq!(component.version(), Some("1.0"));
    /// ```
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Create a record with no key, version, children or events.
    pub fn new(
        component_ref: ComponentRef,
        component_type: ComponentType,
        uuid: ComponentUuid,
        snapshot_id: SnapshotId,
    ) -> Self {
        Self {
            component_ref,
            component_type,
            uuid,
            key: None,
            version: None,
            snapshot_id,
            child_refs: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Read access to one analysis report.
pub trait ReportReader {
    /// Read the run-level metadata.
    fn read_metadata(&self) -> Result<ReportMetadata, ReportError>;

    /// Read the record of one component.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::ComponentNotFound` if the report has no record
    /// for `component_ref`.
    fn read_component(&self, component_ref: ComponentRef) -> Result<ReportComponent, ReportError>;
}
