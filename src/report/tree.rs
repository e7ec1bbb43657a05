//! report::tree
//!
//! Builds the component tree of an analysis from its report.
//!
//! # Invariants
//!
//! The built tree is a proper tree:
//! - Every ref is reachable at most once (no shared children, no cycles)
//! - Every uuid appears at most once
//! - A child is never higher in the hierarchy than its parent
//! - Files have no children
//!
//! Violations are reported as [`ReportError::Malformed`].

use std::collections::HashSet;

use super::{ReportError, ReportReader};
use crate::core::component::{Component, ComponentType};
use crate::core::types::{ComponentRef, ComponentUuid};

/// Refs and uuids already placed in the tree.
#[derive(Default)]
struct Seen {
    refs: HashSet<ComponentRef>,
    uuids: HashSet<ComponentUuid>,
}

/// Build the component tree rooted at the report's root component.
///
/// Children keep the order of `child_refs` in the report.
///
/// # Errors
///
/// - `ReportError::ComponentNotFound` if a child ref has no record
/// - `ReportError::Malformed` if the refs do not form a proper tree or a
///   uuid is used by more than one ref
pub fn build_tree(reader: &dyn ReportReader) -> Result<Component, ReportError> {
    let metadata = reader.read_metadata()?;
    let mut seen = Seen::default();
    build_component(reader, metadata.root_component_ref, None, &mut seen)
}

fn build_component(
    reader: &dyn ReportReader,
    component_ref: ComponentRef,
    parent_type: Option<ComponentType>,
    seen: &mut Seen,
) -> Result<Component, ReportError> {
    if !seen.refs.insert(component_ref) {
        return Err(ReportError::Malformed(format!(
            "component {} is reachable more than once",
            component_ref
        )));
    }

    let record = reader.read_component(component_ref)?;
    if !seen.uuids.insert(record.uuid.clone()) {
        return Err(ReportError::Malformed(format!(
            "duplicate component uuid {} at {}",
            record.uuid, component_ref
        )));
    }
    let kind = record.component_type;

    if let Some(parent_type) = parent_type {
        if kind.is_higher_than(parent_type) {
            return Err(ReportError::Malformed(format!(
                "{} component {} cannot be a child of a {}",
                kind, component_ref, parent_type
            )));
        }
    }
    if kind == ComponentType::File && !record.child_refs.is_empty() {
        return Err(ReportError::Malformed(format!(
            "file component {} cannot have children",
            component_ref
        )));
    }

    let mut component = Component::new(record.uuid, component_ref, kind);
    if let Some(key) = record.key {
        component = component.with_key(key);
    }

    // One stack frame per tree level
    for child_ref in record.child_refs {
        let child = build_component(reader, child_ref, Some(kind), seen)?;
        component.add_child(child);
    }

    Ok(component)
}
