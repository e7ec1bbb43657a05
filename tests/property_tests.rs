//! Property-based tests for traversal and version reconciliation.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated component trees and store contents.

use std::collections::{HashMap, HashSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use analysis_events::core::clock::FixedClock;
use analysis_events::core::component::{Component, ComponentType, TreeRoot};
use analysis_events::core::event::{EventRecord, CATEGORY_VERSION};
use analysis_events::core::types::{ComponentRef, ComponentUuid, SnapshotId};
use analysis_events::core::walker::DepthTraversal;
use analysis_events::engine::PersistEventsStep;
use analysis_events::events::EventRepository;
use analysis_events::report::{JsonReport, ReportComponent, ReportMetadata};
use analysis_events::store::MemoryEventStore;

/// Shape of a random tree: for each non-root node, a parent pick and a
/// type pick. Both are reduced modulo the valid choices when building.
fn tree_shape() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((any::<usize>(), any::<usize>()), 0..40)
}

/// A built tree plus, for each node index, its type and parent index.
struct GeneratedTree {
    root: Component,
    kinds: Vec<ComponentType>,
    parents: Vec<Option<usize>>,
}

fn uuid_of(index: usize) -> ComponentUuid {
    ComponentUuid::new(format!("C{}", index)).unwrap()
}

fn index_of(uuid: &ComponentUuid) -> usize {
    uuid.as_str()[1..].parse().unwrap()
}

/// Build a valid tree: the root is a project, files are leaves, and no
/// child sits above its parent.
fn build(shape: &[(usize, usize)]) -> GeneratedTree {
    let mut kinds = vec![ComponentType::Project];
    let mut parents = vec![None];

    for &(parent_pick, kind_pick) in shape {
        let candidates: Vec<usize> = (0..kinds.len())
            .filter(|&i| kinds[i] != ComponentType::File)
            .collect();
        let parent = candidates[parent_pick % candidates.len()];
        let allowed: Vec<ComponentType> = ComponentType::ALL
            .iter()
            .copied()
            .filter(|k| *k != ComponentType::Project && !k.is_higher_than(kinds[parent]))
            .collect();
        kinds.push(allowed[kind_pick % allowed.len()]);
        parents.push(Some(parent));
    }

    fn assemble(i: usize, kinds: &[ComponentType], parents: &[Option<usize>]) -> Component {
        let mut node = Component::new(uuid_of(i), ComponentRef::new(i as u32 + 1), kinds[i]);
        for (child, parent) in parents.iter().enumerate() {
            if *parent == Some(i) {
                node.add_child(assemble(child, kinds, parents));
            }
        }
        node
    }

    GeneratedTree {
        root: assemble(0, &kinds, &parents),
        kinds,
        parents,
    }
}

fn report_for(tree: &GeneratedTree, versions: &[Option<String>]) -> JsonReport {
    let components = tree
        .kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let mut record = ReportComponent::new(
                ComponentRef::new(i as u32 + 1),
                *kind,
                uuid_of(i),
                SnapshotId::new(i as i64),
            );
            record.version = versions.get(i).cloned().flatten();
            record
        })
        .collect();
    let metadata = ReportMetadata {
        analysis_date: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        project_key: "org.example:app".to_string(),
        root_component_ref: ComponentRef::new(1),
    };
    JsonReport::new(metadata, components).unwrap()
}

fn version_record(index: usize, name: &str) -> EventRecord {
    let date = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    EventRecord {
        component_uuid: uuid_of(index),
        snapshot_id: SnapshotId::new(0),
        created_at: date,
        date,
        category: CATEGORY_VERSION.to_string(),
        name: name.to_string(),
        description: None,
        data: None,
    }
}

proptest! {
    /// Pre-order traversal visits every node exactly once, parent first.
    #[test]
    fn traversal_visits_each_node_once_parent_first(shape in tree_shape()) {
        let tree = build(&shape);
        let mut visited = Vec::new();
        DepthTraversal::pre_order()
            .walk(&tree.root, |c| {
                visited.push(index_of(c.uuid()));
                Ok::<(), ()>(())
            })
            .unwrap();

        prop_assert_eq!(visited.len(), tree.kinds.len());
        let unique: HashSet<_> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len());

        let position: HashMap<usize, usize> =
            visited.iter().enumerate().map(|(pos, i)| (*i, pos)).collect();
        for (i, parent) in tree.parents.iter().enumerate() {
            if let Some(p) = parent {
                prop_assert!(position[p] < position[&i]);
            }
        }
    }

    /// Post-order traversal visits every node exactly once, root last.
    #[test]
    fn post_order_visits_root_last(shape in tree_shape()) {
        let tree = build(&shape);
        let mut visited = Vec::new();
        DepthTraversal::post_order()
            .walk(&tree.root, |c| {
                visited.push(index_of(c.uuid()));
                Ok::<(), ()>(())
            })
            .unwrap();

        prop_assert_eq!(visited.len(), tree.kinds.len());
        prop_assert_eq!(visited.last().copied(), Some(0));
    }

    /// Re-running an analysis leaves exactly one version event per declared
    /// version and never touches versions with other names.
    #[test]
    fn version_reconciliation_is_idempotent(
        shape in tree_shape(),
        version_picks in prop::collection::vec(prop::option::of(0u8..3), 41),
        existing_picks in prop::collection::vec((any::<usize>(), 0u8..3), 0..20),
        runs in 1usize..4,
    ) {
        let tree = build(&shape);
        let n = tree.kinds.len();
        let versions: Vec<Option<String>> = version_picks
            .iter()
            .take(n)
            .map(|v| v.map(|v| format!("1.{}", v)))
            .collect();

        let existing: Vec<EventRecord> = existing_picks
            .iter()
            .map(|(i, v)| version_record(i % n, &format!("1.{}", v)))
            .collect();
        let store = MemoryEventStore::with_events(existing.clone());

        let report = report_for(&tree, &versions);
        let root = TreeRoot::new(tree.root.clone());
        let events = EventRepository::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap());

        for _ in 0..runs {
            PersistEventsStep::new(&store, &clock, &root, &report, &events)
                .run()
                .unwrap();
        }

        for i in 0..n {
            let names: Vec<String> = store
                .events_for(&uuid_of(i))
                .into_iter()
                .map(|e| e.record.name)
                .collect();
            let mut expected: Vec<String> = existing
                .iter()
                .filter(|r| r.component_uuid == uuid_of(i))
                .filter(|r| versions[i].as_deref() != Some(r.name.as_str()))
                .map(|r| r.name.clone())
                .collect();
            if let Some(v) = &versions[i] {
                expected.push(v.clone());
            }
            prop_assert_eq!(names, expected);
        }
        prop_assert_eq!(store.commit_count(), runs);
    }
}
