// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mindtree Layout: turns a [`MindNode`](mindtree_model::MindNode) document into a render
//! tree on a [`Surface`](mindtree_surface::Surface).
//!
//! A layout pass is a full rebuild. [`LayoutEngine::layout`] empties its two host-owned
//! containers, presents the root topic into the first, and one branch group per child of
//! the root into the second. Every non-root node becomes a group holding a top row (topic
//! plus, for nodes with children, an expander) and, when expanded, a children container
//! with the child groups in document order. Collapsed subtrees are not rendered at all.
//!
//! The root's children are split between the two sides according to [`SideMode`]. In
//! balanced mode each child that has no direction yet is sent to the currently lighter
//! side, ties going left, and the chosen direction is written back into the document so
//! that later passes keep it (see [`balance_sides`]).
//!
//! ## Example
//!
//! ```rust
//! use mindtree_layout::{ExpanderState, LayoutConfig, LayoutEngine};
//! use mindtree_model::MindNode;
//! use mindtree_surface::{ElementKind, MemorySurface, Surface};
//!
//! let mut surface = MemorySurface::new();
//! let root_box = surface.create(ElementKind::Container);
//! let branch_box = surface.create(ElementKind::Container);
//! let engine = LayoutEngine::new(LayoutConfig::default(), root_box, branch_box);
//!
//! let mut doc = MindNode::new("root", "Plan").with_child(
//!     MindNode::new("a", "Research")
//!         .with_expanded(false)
//!         .with_child(MindNode::new("a1", "Read papers")),
//! );
//!
//! let tree = engine.layout(&mut doc, &mut surface).unwrap();
//! let a = tree.node("a").unwrap();
//! assert_eq!(a.expander_state(), Some(ExpanderState::Collapsed));
//! assert!(tree.find("a1").is_none());
//! assert_eq!(surface.text_content(tree.root.handles.topic), "Plan");
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `mindtree_surface/std`.
//! - `libm`: `no_std` math backend for `kurbo`.
//! - `tracing`: a `debug` span per layout pass and a `warn` event when a document is
//!   rejected.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod error;
mod expander;
mod topic;

pub use engine::{
    LayoutConfig, LayoutEngine, RenderChildren, RenderNode, RenderTree, SideMode, balance_sides,
};
pub use error::LayoutError;
pub use expander::{ExpanderState, ExpanderVisual, render_expander};
pub use topic::{
    LINK_GLYPH, TopicHandles, TopicVisual, node_marker, present_topic, presentation_for,
};
