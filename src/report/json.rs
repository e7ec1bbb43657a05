//! report::json
//!
//! Analysis reports stored as a single JSON document.
//!
//! # Format
//!
//! ```json
//! {
//!   "metadata": {
//!     "analysis_date": "2026-01-05T10:00:00Z",
//!     "project_key": "org.example:app",
//!     "root_component_ref": 1
//!   },
//!   "components": [
//!     { "ref": 1, "type": "PROJECT", "uuid": "AX-root", "version": "2.0",
//!       "snapshot_id": 100, "child_refs": [2] },
//!     { "ref": 2, "type": "FILE", "uuid": "AX-file", "snapshot_id": 101,
//!       "events": [ { "name": "Red (was Green)", "category": "ALERT" } ] }
//!   ]
//! }
//! ```
//!
//! The whole document is parsed up front; refs must be unique and the root
//! ref must have a record.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ReportComponent, ReportError, ReportMetadata, ReportReader};
use crate::core::types::ComponentRef;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportDocument {
    metadata: ReportMetadata,
    #[serde(default)]
    components: Vec<ReportComponent>,
}

/// A fully loaded JSON analysis report.
#[derive(Debug, Clone)]
pub struct JsonReport {
    metadata: ReportMetadata,
    components: BTreeMap<ComponentRef, ReportComponent>,
}

impl JsonReport {
    /// Load a report from a file.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = fs::read_to_string(path).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a report from a JSON string.
    ///
    /// # Errors
    ///
    /// - `ReportError::Parse` if the JSON does not match the format
    /// - `ReportError::Malformed` on duplicate refs or a missing root record
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let document: ReportDocument =
            serde_json::from_str(json).map_err(|e| ReportError::Parse(e.to_string()))?;
        Self::new(document.metadata, document.components)
    }

    /// Build a report from already-parsed parts.
    pub fn new(
        metadata: ReportMetadata,
        components: Vec<ReportComponent>,
    ) -> Result<Self, ReportError> {
        let mut by_ref = BTreeMap::new();
        for component in components {
            let component_ref = component.component_ref;
            if by_ref.insert(component_ref, component).is_some() {
                return Err(ReportError::Malformed(format!(
                    "duplicate component ref {}",
                    component_ref
                )));
            }
        }

        if !by_ref.contains_key(&metadata.root_component_ref) {
            return Err(ReportError::Malformed(format!(
                "root component {} has no record",
                metadata.root_component_ref
            )));
        }

        Ok(Self {
            metadata,
            components: by_ref,
        })
    }

    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// All component records, ordered by ref.
    pub fn components(&self) -> impl Iterator<Item = &ReportComponent> {
        self.components.values()
    }
}

impl ReportReader for JsonReport {
    fn read_metadata(&self) -> Result<ReportMetadata, ReportError> {
        Ok(self.metadata.clone())
    }

    fn read_component(&self, component_ref: ComponentRef) -> Result<ReportComponent, ReportError> {
        self.components
            .get(&component_ref)
            .cloned()
            .ok_or(ReportError::ComponentNotFound(component_ref))
    }
}
