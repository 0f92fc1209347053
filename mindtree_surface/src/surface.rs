// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Surface`] trait.

use alloc::string::String;
use core::fmt::Debug;

use crate::types::{ElementFlags, ElementKind, EventMask, Presentation};

/// A retained tree of visual elements that Mindtree draws into.
///
/// All methods take element handles produced by [`Surface::create`]. Implementations
/// should treat handles of removed elements as stale and ignore them rather than panic;
/// the layout engine discards whole subtrees on every full pass.
///
/// Input is not delivered through this trait. [`Surface::listen`] tells the host which
/// events to forward for an element; the host then feeds them to the edit controller.
pub trait Surface {
    /// Handle type for elements of this surface.
    type Element: Copy + Eq + Debug;

    /// Create a detached element.
    fn create(&mut self, kind: ElementKind) -> Self::Element;

    /// Attach `child` as the last child of `parent`, detaching it from any previous parent.
    fn append(&mut self, parent: Self::Element, child: Self::Element);

    /// Detach and destroy `element` and its whole subtree.
    fn remove(&mut self, element: Self::Element);

    /// Destroy every child of `element`, keeping `element` itself.
    fn clear_children(&mut self, element: Self::Element);

    /// Replace the element's own text.
    fn set_text(&mut self, element: Self::Element, text: &str);

    /// Text of the element and its descendants, concatenated in tree order.
    fn text_content(&self, element: Self::Element) -> String;

    /// Apply presentation attributes. `None` fields leave the surface default in place.
    fn set_presentation(&mut self, element: Self::Element, presentation: &Presentation);

    /// Add a class name.
    fn add_class(&mut self, element: Self::Element, class: &str);

    /// Set a named string attribute, replacing any previous value.
    fn set_attr(&mut self, element: Self::Element, name: &str, value: &str);

    /// Replace the element's boolean attributes.
    fn set_flags(&mut self, element: Self::Element, flags: ElementFlags);

    /// Current rendered width in pixels.
    fn width(&self, element: Self::Element) -> f64;

    /// Lower bound for the rendered width in pixels.
    fn set_min_width(&mut self, element: Self::Element, width: f64);

    /// Pin the element to the right edge of its parent so it grows leftwards.
    fn set_anchor_right(&mut self, element: Self::Element);

    /// Give the element input focus.
    fn focus(&mut self, element: Self::Element);

    /// Take input focus away from the element if it has it.
    fn blur(&mut self, element: Self::Element);

    /// Select all text inside the element.
    fn select_all(&mut self, element: Self::Element);

    /// Start forwarding `events` for the element.
    fn listen(&mut self, element: Self::Element, events: EventMask);

    /// Stop forwarding `events` for the element.
    fn unlisten(&mut self, element: Self::Element, events: EventMask);
}
