// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mindtree Edit: in-place editing of a single topic.
//!
//! An [`EditController`] holds at most one edit session. Opening a session puts an editable
//! element inside the node's rendered topic, pre-filled with the plain topic text (never the
//! decorations), focuses it, selects everything, and fires [`Operation::BeginEdit`] on the
//! [`EventBus`]. The host forwards the editor's key and blur events as [`EditInput`]s.
//!
//! Blur, Enter, and Tab commit; Enter or Tab with shift inserts a line break. A commit
//! trims the typed text and writes it to the node, keeping the original text if the
//! result is blank. Only the topic's base text element is patched, and only when the text
//! actually changed. Every commit fires [`Operation::FinishEdit`] carrying the original
//! text, so an external history module can record it.
//!
//! ## Example
//!
//! ```rust
//! use mindtree_edit::{EditController, EditInput, EditTransition, Operation};
//! use mindtree_layout::{LayoutConfig, LayoutEngine};
//! use mindtree_model::MindNode;
//! use mindtree_surface::{ElementKind, MemorySurface, Surface};
//!
//! let mut surface = MemorySurface::new();
//! let root_box = surface.create(ElementKind::Container);
//! let branch_box = surface.create(ElementKind::Container);
//! let engine = LayoutEngine::new(LayoutConfig::default(), root_box, branch_box);
//! let mut doc = MindNode::new("root", "Root").with_child(MindNode::new("1", "A"));
//! let tree = engine.layout(&mut doc, &mut surface).unwrap();
//!
//! let mut ops: Vec<Operation> = Vec::new();
//! let mut edit = EditController::default();
//! edit.begin("1", &mut doc, &tree, &mut surface, &mut ops).unwrap();
//!
//! // The user types into the editor, then focus moves away.
//! surface.set_text(edit.editor().unwrap(), "  B ");
//! let t = edit.handle(EditInput::Blur, &mut doc, &mut surface, &mut ops).unwrap();
//!
//! assert!(matches!(t, EditTransition::Committed(ref o) if o.changed));
//! assert_eq!(doc.find("1").unwrap().topic, "B");
//! assert_eq!(
//!     ops.last(),
//!     Some(&Operation::FinishEdit { id: "1".into(), topic: "B".into(), origin: "A".into() })
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default) and `libm`: forwarded to `mindtree_layout`.
//! - `tracing`: `debug` events when sessions open and close, `warn` when the edited node
//!   disappears.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bus;
mod controller;
mod error;

pub use bus::{EventBus, Operation};
pub use controller::{
    CommitOutcome, EditConfig, EditController, EditInput, EditKey, EditTransition, EditorAnchor,
};
pub use error::EditError;
