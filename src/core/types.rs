//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ComponentUuid`] - Stable identity of a component across analyses
//! - [`ComponentRef`] - Report-local reference to a component record
//! - [`SnapshotId`] - Opaque identifier of the analysis snapshot
//! - [`EventId`] - Identity assigned by the event store
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use analysis_events::core::types::{ComponentRef, ComponentUuid};
//!
//! let uuid = ComponentUuid::new("AXkQ-project").unwrap();
//! let r = ComponentRef::new(1);
//! assert_eq!(uuid.as_str(), "AXkQ-project");
//! assert_eq!(r.get(), 1);
//!
//! // Invalid constructions fail at creation time
//! assert!(ComponentUuid::new("").is_err());
//! assert!(ComponentUuid::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid component uuid: {0}")]
    InvalidComponentUuid(String),
}

/// A validated component uuid.
///
/// Uuids are opaque strings produced when the component tree is built.
/// They must be non-empty and must not contain whitespace or control
/// characters, since they are used as lookup keys in the event store.
///
/// # Example
///
/// ```
/// use analysis_events::core::types::ComponentUuid;
///
/// let uuid = ComponentUuid::new("AX-module:core").unwrap();
/// assert_eq!(uuid.to_string(), "AX-module:core");
///
/// assert!(ComponentUuid::new("").is_err());
/// assert!(ComponentUuid::new("tab\there").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentUuid(String);

impl ComponentUuid {
    /// Create a new validated component uuid.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidComponentUuid` if the uuid is empty or
    /// contains whitespace/control characters.
    pub fn new(uuid: impl Into<String>) -> Result<Self, TypeError> {
        let uuid = uuid.into();
        Self::validate(&uuid)?;
        Ok(Self(uuid))
    }

    fn validate(uuid: &str) -> Result<(), TypeError> {
        if uuid.is_empty() {
            return Err(TypeError::InvalidComponentUuid(
                "component uuid cannot be empty".into(),
            ));
        }
        if uuid.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidComponentUuid(format!(
                "component uuid cannot contain whitespace or control characters: {uuid:?}"
            )));
        }
        Ok(())
    }

    /// Get the uuid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ComponentUuid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ComponentUuid> for String {
    fn from(uuid: ComponentUuid) -> Self {
        uuid.0
    }
}

impl AsRef<str> for ComponentUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference of a component record inside one analysis report.
///
/// Refs are only meaningful within the report that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(u32);

impl ComponentRef {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identifier of the stored snapshot an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(i64);

impl SnapshotId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a persisted event, assigned by the event store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod component_uuid {
        use super::*;

        #[test]
        fn accepts_typical_uuids() {
            assert!(ComponentUuid::new("AXkQ3eV8").is_ok());
            assert!(ComponentUuid::new("org.example:app:src/Main.java").is_ok());
            assert!(ComponentUuid::new("7c9e6679-7425-40de-944b-e07fc1f90ae7").is_ok());
        }

        #[test]
        fn rejects_empty() {
            assert!(matches!(
                ComponentUuid::new(""),
                Err(TypeError::InvalidComponentUuid(_))
            ));
        }

        #[test]
        fn rejects_whitespace_and_control() {
            assert!(ComponentUuid::new("a b").is_err());
            assert!(ComponentUuid::new("a\nb").is_err());
            assert!(ComponentUuid::new("a\u{7f}b").is_err());
        }

        #[test]
        fn serde_uses_plain_string() {
            let uuid = ComponentUuid::new("AX-1").unwrap();
            let json = serde_json::to_string(&uuid).unwrap();
            assert_eq!(json, "\"AX-1\"");
            let parsed: ComponentUuid = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, uuid);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<ComponentUuid, _> = serde_json::from_str("\"\"");
            assert!(result.is_err());
        }
    }

    #[test]
    fn component_ref_display() {
        assert_eq!(ComponentRef::new(7).to_string(), "#7");
    }

    #[test]
    fn numeric_ids_are_transparent_in_json() {
        assert_eq!(serde_json::to_string(&SnapshotId::new(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&EventId::new(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&ComponentRef::new(9)).unwrap(), "9");
    }
}
