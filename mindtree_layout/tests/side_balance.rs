// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for side assignment and expand/collapse visibility.
//!
//! 1. Balancing unassigned children keeps the sides within one of each other, ties left.
//! 2. Explicit directions survive balancing.
//! 3. A second layout pass changes no direction.
//! 4. Nothing under a collapsed node is rendered; everything else reachable is.
//! 5. Inserting or removing siblings never moves an existing branch to the other side.

use mindtree_layout::{LayoutConfig, LayoutEngine, balance_sides};
use mindtree_model::{Direction, MindNode};
use mindtree_surface::{ElementKind, MemorySurface, Surface};
use proptest::prelude::*;

fn direction_strategy() -> impl Strategy<Value = Option<Direction>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(Direction::Left)),
        1 => Just(Some(Direction::Right)),
    ]
}

fn children_from(dirs: &[Option<Direction>]) -> Vec<MindNode> {
    dirs.iter()
        .enumerate()
        .map(|(i, d)| {
            let mut n = MindNode::new(format!("c{i}"), "child");
            n.direction = *d;
            n
        })
        .collect()
}

/// Random tree shape: each entry is (parent index, collapsed) for node i + 1.
fn shape_strategy() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((any::<prop::sample::Index>(), prop::bool::weighted(0.25)), 0..40)
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (parent, collapsed))| (parent.index(i + 1), collapsed))
                .collect()
        })
}

fn build(shape: &[(usize, bool)]) -> MindNode {
    // Node 0 is the root; node k's parent has a lower index, so build bottom-up.
    let count = shape.len() + 1;
    let mut nodes: Vec<Option<MindNode>> = (0..count)
        .map(|i| Some(MindNode::new(format!("n{i}"), format!("topic {i}"))))
        .collect();
    for (i, &(_, collapsed)) in shape.iter().enumerate() {
        if collapsed {
            nodes[i + 1].as_mut().unwrap().expanded = Some(false);
        }
    }
    for i in (1..count).rev() {
        let child = nodes[i].take().unwrap();
        let parent = shape[i - 1].0;
        nodes[parent].as_mut().unwrap().children.insert(0, child);
    }
    nodes[0].take().unwrap()
}

fn expected_visible(node: &MindNode, out: &mut Vec<String>) {
    for c in &node.children {
        out.push(c.id.clone());
        if c.is_expanded() {
            expected_visible(c, out);
        }
    }
}

#[derive(Clone, Debug)]
enum Churn {
    Insert(prop::sample::Index),
    Remove(prop::sample::Index),
}

fn churn_strategy() -> impl Strategy<Value = Churn> {
    prop_oneof![
        any::<prop::sample::Index>().prop_map(Churn::Insert),
        any::<prop::sample::Index>().prop_map(Churn::Remove),
    ]
}

fn engine(surface: &mut MemorySurface) -> LayoutEngine<mindtree_surface::ElementId> {
    let root_box = surface.create(ElementKind::Container);
    let branch_box = surface.create(ElementKind::Container);
    LayoutEngine::new(LayoutConfig::default(), root_box, branch_box)
}

proptest! {
    #[test]
    fn unassigned_children_balance_with_ties_left(n in 0usize..64) {
        let mut children = children_from(&vec![None; n]);
        let (left, right) = balance_sides(&mut children);
        prop_assert_eq!(left + right, n);
        prop_assert!(left == right || left == right + 1, "left={} right={}", left, right);
        for (i, c) in children.iter().enumerate() {
            let expected = if i % 2 == 0 { Direction::Left } else { Direction::Right };
            prop_assert_eq!(c.direction, Some(expected));
        }
    }
}

proptest! {
    #[test]
    fn explicit_directions_survive(dirs in prop::collection::vec(direction_strategy(), 0..32)) {
        let mut children = children_from(&dirs);
        let (left, right) = balance_sides(&mut children);
        prop_assert_eq!(left + right, dirs.len());
        for (before, after) in dirs.iter().zip(&children) {
            prop_assert!(after.direction.is_some());
            if before.is_some() {
                prop_assert_eq!(*before, after.direction);
            }
        }
        let counted_left = children
            .iter()
            .filter(|c| c.direction == Some(Direction::Left))
            .count();
        prop_assert_eq!(counted_left, left);
    }
}

proptest! {
    #[test]
    fn relayout_keeps_directions(dirs in prop::collection::vec(direction_strategy(), 0..16)) {
        let mut surface = MemorySurface::new();
        let engine = engine(&mut surface);
        let mut doc = MindNode::new("root", "root").with_children(children_from(&dirs));

        let first = engine.layout(&mut doc, &mut surface).unwrap();
        let after_first: Vec<_> = doc.children.iter().map(|c| c.direction).collect();
        let first_sides: Vec<_> = first.sides().into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(&first_sides, &after_first);

        let second = engine.layout(&mut doc, &mut surface).unwrap();
        let after_second: Vec<_> = doc.children.iter().map(|c| c.direction).collect();
        let second_sides: Vec<_> = second.sides().into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(after_first, after_second);
        prop_assert_eq!(first_sides, second_sides);
    }
}

proptest! {
    #[test]
    fn collapsed_subtrees_are_not_rendered(shape in shape_strategy()) {
        let mut surface = MemorySurface::new();
        let engine = engine(&mut surface);
        let mut doc = build(&shape);
        let tree = engine.layout(&mut doc, &mut surface).unwrap();

        let mut expected = Vec::new();
        expected_visible(&doc, &mut expected);
        let visible: Vec<String> = tree.visible_ids().into_iter().map(String::from).collect();
        prop_assert_eq!(&visible, &expected);

        for i in 1..=shape.len() {
            let id = format!("n{i}");
            let rendered = tree.find(&id).is_some();
            prop_assert_eq!(rendered, expected.contains(&id));
            prop_assert_eq!(
                surface.find_by_node_id(&format!("me{id}")).is_some(),
                rendered
            );
        }
        for (_, node) in tree.walk() {
            let source = doc.find(&node.id).unwrap();
            prop_assert_eq!(node.expander.is_some(), !source.is_leaf());
            prop_assert_eq!(node.children.is_some(), !source.is_leaf() && source.is_expanded());
        }
    }
}

proptest! {
    #[test]
    fn sibling_churn_keeps_existing_sides(
        dirs in prop::collection::vec(direction_strategy(), 0..12),
        rounds in prop::collection::vec(prop::collection::vec(churn_strategy(), 0..6), 1..4),
    ) {
        let mut surface = MemorySurface::new();
        let engine = engine(&mut surface);
        let mut doc = MindNode::new("root", "root").with_children(children_from(&dirs));
        engine.layout(&mut doc, &mut surface).unwrap();

        let mut next_id = dirs.len();
        for ops in rounds {
            let before: Vec<(String, Option<Direction>)> = doc
                .children
                .iter()
                .map(|c| (c.id.clone(), c.direction))
                .collect();

            for op in ops {
                match op {
                    Churn::Insert(at) => {
                        let at = at.index(doc.children.len() + 1);
                        doc.children.insert(at, MindNode::new(format!("c{next_id}"), "new"));
                        next_id += 1;
                    }
                    Churn::Remove(at) if !doc.children.is_empty() => {
                        let at = at.index(doc.children.len());
                        doc.children.remove(at);
                    }
                    Churn::Remove(_) => {}
                }
            }

            let tree = engine.layout(&mut doc, &mut surface).unwrap();
            for (id, direction) in &before {
                if let Some(child) = doc.children.iter().find(|c| &c.id == id) {
                    prop_assert_eq!(child.direction, *direction, "{} changed side", id);
                }
            }
            prop_assert!(doc.children.iter().all(|c| c.direction.is_some()));
            let sides: Vec<_> = tree.sides().into_iter().map(|(_, s)| s).collect();
            let directions: Vec<_> = doc.children.iter().map(|c| c.direction).collect();
            prop_assert_eq!(sides, directions);
        }
    }
}
