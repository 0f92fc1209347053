// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mindtree Model: the mind-map document tree.
//!
//! A mind map is a single root [`MindNode`] owning an ordered list of child nodes, each of
//! which may own children in turn. Every node carries a display `topic`, an optional
//! expand/collapse flag, an optional side tag ([`Direction`]) for branches hanging off the
//! root, optional presentation attributes ([`NodeStyle`]), and a closed set of optional
//! decorations (hyperlink, icons, tags).
//!
//! The document is owned by the host. The layout engine reads it and normalizes the
//! `direction` of the root's children; the edit controller writes `topic`. Nothing else
//! in the Mindtree crates mutates it.
//!
//! ## Structure guard
//!
//! Owned children make cycles unrepresentable, but ids are plain strings and nothing stops
//! a loader from producing duplicates, and a pathological document can be deep enough to
//! exhaust the stack of any recursive walker. [`validate`] checks both and reports the
//! first violation as a [`StructureError`].
//!
//! ```rust
//! use mindtree_model::{Direction, MindNode, StructureError, validate};
//!
//! let root = MindNode::new("root", "Plans")
//!     .with_child(MindNode::new("a", "Work").with_direction(Direction::Right))
//!     .with_child(MindNode::new("b", "Home").with_child(MindNode::new("c", "Garden")));
//!
//! assert!(validate(&root, 64).is_ok());
//! assert_eq!(root.find("c").map(|n| n.topic.as_str()), Some("Garden"));
//!
//! let broken = MindNode::new("root", "Plans")
//!     .with_child(MindNode::new("a", "Work"))
//!     .with_child(MindNode::new("a", "Again"));
//! assert_eq!(validate(&broken, 64), Err(StructureError::DuplicateId("a".into())));
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for the model using the camelCase field
//!   names of the document format (`hyperLink`, `fontSize`, ...). Directions are encoded
//!   as `0` (left) and `1` (right).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod node;
mod validate;

pub use node::{Direction, InvalidDirection, MindNode, NodeStyle};
pub use validate::{StructureError, validate};
