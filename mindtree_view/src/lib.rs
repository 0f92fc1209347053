// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mindtree View: a mind map bound to a surface.
//!
//! [`MindMap`] owns a [`MindNode`](mindtree_model::MindNode) document, a
//! [`Surface`](mindtree_surface::Surface), and an [`EventBus`](mindtree_edit::EventBus),
//! plus the layout engine and edit controller that work on them. It is the single place
//! where layout and editing are sequenced:
//!
//! - [`MindMap::relayout`] commits any open edit, then rebuilds the render tree.
//! - [`MindMap::toggle`] flips one node's expanded flag and redraws only that branch.
//! - [`MindMap::begin_edit`] / [`MindMap::handle_input`] drive the in-place editor; a
//!   commit made with Enter or Tab hands input focus back to the map container.
//!
//! ## Example
//!
//! ```rust
//! use mindtree_edit::{EditInput, EditKey, Operation};
//! use mindtree_model::MindNode;
//! use mindtree_surface::{MemorySurface, Surface};
//! use mindtree_view::{MapConfig, MindMap};
//!
//! let doc = MindNode::new("root", "Trip")
//!     .with_child(MindNode::new("a", "Tickets"))
//!     .with_child(
//!         MindNode::new("b", "Packing")
//!             .with_expanded(false)
//!             .with_child(MindNode::new("b1", "Socks")),
//!     );
//!
//! let bus = Vec::<Operation>::new();
//! let mut map = MindMap::new(doc, MemorySurface::new(), bus, MapConfig::default());
//! map.relayout().unwrap();
//! assert_eq!(map.tree().unwrap().visible_ids(), ["a", "b"]);
//!
//! map.toggle("b").unwrap();
//! assert_eq!(map.tree().unwrap().visible_ids(), ["a", "b", "b1"]);
//!
//! map.begin_edit("a").unwrap();
//! let editor = map.editor().editor().unwrap();
//! map.surface_mut().set_text(editor, "Train tickets");
//! map.handle_input(EditInput::key(EditKey::Enter)).unwrap();
//! assert_eq!(map.document().find("a").unwrap().topic, "Train tickets");
//! assert_eq!(map.surface().focused(), Some(map.container()));
//! ```
//!
//! ## Features
//!
//! - `std` (default) and `libm`: forwarded down to `kurbo`.
//! - `tracing`: structured events from every layer.
//! - `serde`: `Serialize`/`Deserialize` for the document model.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod map;

pub use error::ViewError;
pub use map::{MapConfig, MindMap};
