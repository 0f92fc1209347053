// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mindtree Surface: the rendering-surface contract consumed by the layout engine and the
//! edit controller.
//!
//! Mindtree never creates platform widgets itself. Everything it draws goes through the
//! [`Surface`] trait: create an element of a given [`ElementKind`], append it under a
//! parent, set its text, presentation, classes and attributes, measure it, move input focus
//! and selection, and subscribe to the events the edit controller cares about
//! ([`EventMask`]). A host backs the trait with whatever it renders into (a DOM, a retained
//! scene graph, a terminal buffer).
//!
//! [`MemorySurface`] is a complete retained implementation over a generational arena. It is
//! what the Mindtree test suites run against, and it is a reasonable backing store for
//! headless hosts that render from a snapshot.
//!
//! ```rust
//! use mindtree_surface::{ElementKind, MemorySurface, Surface};
//!
//! let mut surface = MemorySurface::new();
//! let topic = surface.create(ElementKind::Topic);
//! let text = surface.create(ElementKind::Text);
//! surface.append(topic, text);
//! surface.set_text(text, "Hello");
//!
//! assert_eq!(surface.text_content(topic), "Hello");
//! assert_eq!(surface.children_of(topic), &[text]);
//!
//! // Removing an element removes its subtree; stale handles are ignored.
//! surface.remove(topic);
//! assert!(!surface.is_alive(text));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod memory;
mod surface;
mod types;

pub use memory::MemorySurface;
pub use surface::Surface;
pub use types::{ElementFlags, ElementId, ElementKind, EventMask, NODE_ID_ATTR, Presentation};
