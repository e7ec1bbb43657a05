//! core::component
//!
//! The component tree an analysis is reported against.
//!
//! # Architecture
//!
//! The tree is owned top-down: a [`Component`] owns its children and holds
//! no pointer back to its parent. Components are built once per analysis
//! (see [`crate::report::tree`]) and are read-only afterwards.
//!
//! # Invariants
//!
//! - Types only get deeper going down: a FILE has no children
//! - Each component appears exactly once in the tree

use serde::{Deserialize, Serialize};

use super::types::{ComponentRef, ComponentUuid};

/// Kind of a component, ordered from the root of the hierarchy down.
///
/// The derived ordering is the depth ordering: `Project < Module <
/// Directory < File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Project,
    Module,
    Directory,
    File,
}

impl ComponentType {
    /// All component types, root first.
    pub const ALL: [ComponentType; 4] = [
        ComponentType::Project,
        ComponentType::Module,
        ComponentType::Directory,
        ComponentType::File,
    ];

    /// Whether this type sits strictly below `other` in the hierarchy.
    ///
    /// ```
    /// use analysis_events::core::component::ComponentType;
    ///
    /// assert!(ComponentType::File.is_deeper_than(ComponentType::Directory));
    /// assert!(!ComponentType::Module.is_deeper_than(ComponentType::Module));
    /// ```
    pub fn is_deeper_than(self, other: ComponentType) -> bool {
        self > other
    }

    /// Whether this type sits strictly above `other` in the hierarchy.
    pub fn is_higher_than(self, other: ComponentType) -> bool {
        self < other
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::Project => write!(f, "PROJECT"),
            ComponentType::Module => write!(f, "MODULE"),
            ComponentType::Directory => write!(f, "DIRECTORY"),
            ComponentType::File => write!(f, "FILE"),
        }
    }
}

/// One node of the component tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    uuid: ComponentUuid,
    report_ref: ComponentRef,
    kind: ComponentType,
    key: Option<String>,
    children: Vec<Component>,
}

impl Component {
    /// Create a leaf component.
    pub fn new(uuid: ComponentUuid, report_ref: ComponentRef, kind: ComponentType) -> Self {
        Self {
            uuid,
            report_ref,
            kind,
            key: None,
            children: Vec::new(),
        }
    }

    /// Set the human-readable key (e.g. `org.example:app:src/Main.java`).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append a child and return self, for building trees inline.
    ///
    /// ```
    /// use analysis_events::core::component::{Component, ComponentType};
    /// use analysis_events::core::types::{ComponentRef, ComponentUuid};
    ///
    /// let file = Component::new(
    ///     ComponentUuid::new("F").unwrap(),
    ///     ComponentRef::new(2),
    ///     ComponentType::File,
    /// );
    /// let project = Component::new(
    ///     ComponentUuid::new("P").unwrap(),
    ///     ComponentRef::new(1),
    ///     ComponentType::Project,
    /// )
    /// .with_child(file);
    ///
    /// assert_eq!(project.children().len(), 1);
    /// assert_eq!(project.size(), 2);
    /// ```
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    pub fn uuid(&self) -> &ComponentUuid {
        &self.uuid
    }

    pub fn report_ref(&self) -> ComponentRef {
        self.report_ref
    }

    pub fn kind(&self) -> ComponentType {
        self.kind
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Number of components in this subtree, including self.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Component::size).sum::<usize>()
    }
}

/// Provides the root of the component tree for the current analysis.
pub trait TreeRootHolder {
    /// The root component.
    fn root(&self) -> &Component;
}

/// The standard [`TreeRootHolder`]: owns the tree built for one analysis.
#[derive(Debug, Clone)]
pub struct TreeRoot {
    root: Component,
}

impl TreeRoot {
    pub fn new(root: Component) -> Self {
        Self { root }
    }

    pub fn into_inner(self) -> Component {
        self.root
    }
}

impl TreeRootHolder for TreeRoot {
    fn root(&self) -> &Component {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(uuid: &str, r: u32, kind: ComponentType) -> Component {
        Component::new(ComponentUuid::new(uuid).unwrap(), ComponentRef::new(r), kind)
    }

    #[test]
    fn type_ordering_follows_depth() {
        assert!(ComponentType::Project < ComponentType::Module);
        assert!(ComponentType::Module < ComponentType::Directory);
        assert!(ComponentType::Directory < ComponentType::File);
        assert!(ComponentType::Project.is_higher_than(ComponentType::File));
        assert!(!ComponentType::File.is_higher_than(ComponentType::File));
    }

    #[test]
    fn type_serde_uses_upper_case() {
        let json = serde_json::to_string(&ComponentType::Directory).unwrap();
        assert_eq!(json, "\"DIRECTORY\"");
        let parsed: ComponentType = serde_json::from_str("\"MODULE\"").unwrap();
        assert_eq!(parsed, ComponentType::Module);
    }

    #[test]
    fn size_counts_whole_subtree() {
        let tree = component("P", 1, ComponentType::Project)
            .with_child(
                component("M", 2, ComponentType::Module)
                    .with_child(component("F1", 3, ComponentType::File))
                    .with_child(component("F2", 4, ComponentType::File)),
            )
            .with_child(component("M2", 5, ComponentType::Module));

        assert_eq!(tree.size(), 5);
        assert_eq!(tree.children()[0].size(), 3);
    }

    #[test]
    fn tree_root_exposes_root() {
        let root = component("P", 1, ComponentType::Project).with_key("org.example:app");
        let holder = TreeRoot::new(root);
        assert_eq!(holder.root().uuid().as_str(), "P");
        assert_eq!(holder.root().key(), Some("org.example:app"));
    }
}
