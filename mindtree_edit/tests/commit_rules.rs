// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the commit rules of an edit session.
//!
//! 1. The committed topic is the trimmed typed text, or the original when that is blank.
//! 2. `finishEdit` fires exactly once per commit and carries the original text.
//! 3. `changed` is true iff the topic differs from the original.
//! 4. Shift+Enter never closes a session.

use mindtree_edit::{EditController, EditInput, EditKey, EditTransition, Operation};
use mindtree_layout::{LayoutConfig, LayoutEngine, RenderTree};
use mindtree_model::MindNode;
use mindtree_surface::{ElementId, ElementKind, MemorySurface, Surface};
use proptest::prelude::*;

fn setup(origin: &str) -> (MemorySurface, MindNode, RenderTree<ElementId>) {
    let mut surface = MemorySurface::new();
    let root_box = surface.create(ElementKind::Container);
    let branch_box = surface.create(ElementKind::Container);
    let engine = LayoutEngine::new(LayoutConfig::default(), root_box, branch_box);
    let mut doc = MindNode::new("root", "Root").with_child(MindNode::new("n", origin));
    let tree = engine.layout(&mut doc, &mut surface).unwrap();
    (surface, doc, tree)
}

fn typed_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t\n]{0,6}",
        "[ \t]{0,3}[a-zA-Z0-9 ]{1,12}[ \t]{0,3}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn commit_trims_or_falls_back(
        origin in "[a-zA-Z][a-zA-Z0-9 ]{0,10}[a-zA-Z]",
        typed in typed_strategy(),
        via_key in any::<bool>(),
    ) {
        let (mut surface, mut doc, tree) = setup(&origin);
        let mut ops: Vec<Operation> = Vec::new();
        let mut edit = EditController::default();

        edit.begin("n", &mut doc, &tree, &mut surface, &mut ops).unwrap();
        let editor = edit.editor().unwrap();
        surface.set_text(editor, &typed);

        let input = if via_key { EditInput::key(EditKey::Enter) } else { EditInput::Blur };
        let transition = edit.handle(input, &mut doc, &mut surface, &mut ops).unwrap();
        let EditTransition::Committed(outcome) = transition else {
            return Err(TestCaseError::fail("session did not commit"));
        };

        let expected = if typed.trim().is_empty() {
            origin.clone()
        } else {
            typed.trim().to_string()
        };
        prop_assert_eq!(&doc.find("n").unwrap().topic, &expected);
        prop_assert_eq!(&outcome.topic, &expected);
        prop_assert_eq!(outcome.changed, expected != origin);
        prop_assert!(!outcome.topic.is_empty());

        let finishes: Vec<_> = ops.iter().filter(|op| op.name() == "finishEdit").collect();
        prop_assert_eq!(finishes.len(), 1);
        prop_assert_eq!(
            finishes[0],
            &Operation::FinishEdit {
                id: "n".into(),
                topic: expected.clone(),
                origin: origin.clone(),
            }
        );
        prop_assert!(!surface.is_alive(editor));
    }
}

proptest! {
    #[test]
    fn shift_enter_keeps_session_open(presses in 1usize..8) {
        let (mut surface, mut doc, tree) = setup("Topic");
        let mut ops: Vec<Operation> = Vec::new();
        let mut edit = EditController::default();
        edit.begin("n", &mut doc, &tree, &mut surface, &mut ops).unwrap();

        for _ in 0..presses {
            let t = edit
                .handle(EditInput::shifted(EditKey::Enter), &mut doc, &mut surface, &mut ops)
                .unwrap();
            prop_assert_eq!(t, EditTransition::LineBreak);
        }
        prop_assert!(edit.is_editing());
        prop_assert_eq!(ops.len(), 1);
    }
}
