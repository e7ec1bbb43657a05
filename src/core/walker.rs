//! core::walker
//!
//! Depth-first traversal of the component tree.
//!
//! # Architecture
//!
//! [`DepthTraversal`] walks a [`Component`] tree and calls a single visitor
//! callback per node. All component types share the same callback; the
//! traversal only decides *which* nodes are visited (depth limit) and *when*
//! (pre- or post-order).
//!
//! # Invariants
//!
//! - Every node within the depth limit is visited exactly once
//! - In pre-order, a parent is visited before any of its children
//! - Children are visited in the order the tree stores them
//! - The first callback error stops the walk and is returned unchanged

use super::component::{Component, ComponentType};

/// When a node is visited relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Node first, then its children.
    PreOrder,
    /// Children first, then the node.
    PostOrder,
}

/// A depth-first, type-limited traversal.
///
/// # Example
///
/// ```
/// use analysis_events::core::component::{Component, ComponentType};
/// use analysis_events::core::types::{ComponentRef, ComponentUuid};
/// use analysis_events::core::walker::DepthTraversal;
///
/// let node = |uuid: &str, r: u32, kind| {
///     Component::new(ComponentUuid::new(uuid).unwrap(), ComponentRef::new(r), kind)
/// };
/// let tree = node("root", 1, ComponentType::Project)
///     .with_child(node("m", 2, ComponentType::Module)
///         .with_child(node("f", 3, ComponentType::File)));
///
/// let mut seen = Vec::new();
/// DepthTraversal::pre_order()
///     .walk(&tree, |c| {
///         seen.push(c.uuid().to_string());
///         Ok::<_, std::convert::Infallible>(())
///     })
///     .unwrap();
///
/// assert_eq!(seen, vec!["root", "m", "f"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTraversal {
    max_depth: ComponentType,
    order: Order,
}

impl DepthTraversal {
    /// Create a traversal visiting nodes down to `max_depth` in `order`.
    pub fn new(max_depth: ComponentType, order: Order) -> Self {
        Self { max_depth, order }
    }

    /// Pre-order traversal down to file granularity.
    pub fn pre_order() -> Self {
        Self::new(ComponentType::File, Order::PreOrder)
    }

    /// Post-order traversal down to file granularity.
    pub fn post_order() -> Self {
        Self::new(ComponentType::File, Order::PostOrder)
    }

    pub fn max_depth(&self) -> ComponentType {
        self.max_depth
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Walk the tree rooted at `root`, calling `visit` on each node.
    ///
    /// Nodes deeper than the depth limit are neither visited nor descended
    /// into.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `visit`. No further nodes are
    /// visited after it.
    pub fn walk<E, F>(&self, root: &Component, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Component) -> Result<(), E>,
    {
        self.walk_from(root, &mut visit)
    }

    fn walk_from<E, F>(&self, component: &Component, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&Component) -> Result<(), E>,
    {
        if component.kind().is_deeper_than(self.max_depth) {
            return Ok(());
        }

        if self.order == Order::PreOrder {
            visit(component)?;
        }

        // One stack frame per tree level
        if component.kind().is_higher_than(self.max_depth) {
            for child in component.children() {
                self.walk_from(child, visit)?;
            }
        }

        if self.order == Order::PostOrder {
            visit(component)?;
        }

        Ok(())
    }
}

impl Default for DepthTraversal {
    fn default() -> Self {
        Self::pre_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ComponentRef, ComponentUuid};
    use std::convert::Infallible;

    fn node(uuid: &str, r: u32, kind: ComponentType) -> Component {
        Component::new(ComponentUuid::new(uuid).unwrap(), ComponentRef::new(r), kind)
    }

    /// project
    /// ├── m1
    /// │   ├── d1
    /// │   │   ├── f1
    /// │   │   └── f2
    /// │   └── f3
    /// └── m2
    ///     └── d2
    fn sample_tree() -> Component {
        node("project", 1, ComponentType::Project)
            .with_child(
                node("m1", 2, ComponentType::Module)
                    .with_child(
                        node("d1", 3, ComponentType::Directory)
                            .with_child(node("f1", 4, ComponentType::File))
                            .with_child(node("f2", 5, ComponentType::File)),
                    )
                    .with_child(node("f3", 6, ComponentType::File)),
            )
            .with_child(
                node("m2", 7, ComponentType::Module)
                    .with_child(node("d2", 8, ComponentType::Directory)),
            )
    }

    fn collect(traversal: DepthTraversal, tree: &Component) -> Vec<String> {
        let mut seen = Vec::new();
        traversal
            .walk(tree, |c| {
                seen.push(c.uuid().to_string());
                Ok::<_, Infallible>(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let seen = collect(DepthTraversal::pre_order(), &sample_tree());
        assert_eq!(
            seen,
            vec!["project", "m1", "d1", "f1", "f2", "f3", "m2", "d2"]
        );
    }

    #[test]
    fn post_order_visits_children_before_parent() {
        let seen = collect(DepthTraversal::post_order(), &sample_tree());
        assert_eq!(
            seen,
            vec!["f1", "f2", "d1", "f3", "m1", "d2", "m2", "project"]
        );
    }

    #[test]
    fn single_node_tree() {
        let tree = node("only", 1, ComponentType::File);
        assert_eq!(collect(DepthTraversal::pre_order(), &tree), vec!["only"]);
    }

    #[test]
    fn depth_limit_stops_descent() {
        let traversal = DepthTraversal::new(ComponentType::Directory, Order::PreOrder);
        let seen = collect(traversal, &sample_tree());
        assert_eq!(seen, vec!["project", "m1", "d1", "m2", "d2"]);
    }

    #[test]
    fn depth_limit_at_project_visits_root_only() {
        let traversal = DepthTraversal::new(ComponentType::Project, Order::PreOrder);
        assert_eq!(collect(traversal, &sample_tree()), vec!["project"]);
    }

    #[test]
    fn root_deeper_than_limit_visits_nothing() {
        let traversal = DepthTraversal::new(ComponentType::Module, Order::PreOrder);
        let tree = node("f", 1, ComponentType::File);
        assert!(collect(traversal, &tree).is_empty());
    }

    #[test]
    fn error_aborts_walk_immediately() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        let result = DepthTraversal::pre_order().walk(&tree, |c| {
            seen.push(c.uuid().to_string());
            if c.uuid().as_str() == "d1" {
                Err("boom")
            } else {
                Ok(())
            }
        });

        assert_eq!(result, Err("boom"));
        // Nothing after d1: not its children, not its siblings
        assert_eq!(seen, vec!["project", "m1", "d1"]);
    }

    #[test]
    fn every_node_visited_once() {
        let tree = sample_tree();
        let seen = collect(DepthTraversal::pre_order(), &tree);
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), seen.len());
        assert_eq!(seen.len(), tree.size());
    }
}
