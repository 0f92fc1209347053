// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by every surface: element kinds, flags, event masks, presentation.

use alloc::string::String;

/// Attribute carrying the `me<id>` marker that ties a topic element to its document node.
pub const NODE_ID_ATTR: &str = "data-nodeid";

/// Identifier for an element of a [`MemorySurface`](crate::MemorySurface) (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of element kinds a mind map is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Host-owned container the map is laid out into (the map root or the branch box).
    Container,
    /// Wrapper around one node and its subtree; carries the side class.
    Group,
    /// Row holding a topic and, for non-leaves, its expander.
    Top,
    /// The presented topic.
    Topic,
    /// The topic's base text. Always the first child of a [`ElementKind::Topic`].
    Text,
    /// Expand/collapse toggle.
    Expander,
    /// Container for the groups of a node's children.
    Children,
    /// Hyperlink indicator.
    Link,
    /// Container for icon spans.
    Icons,
    /// A single icon glyph.
    Icon,
    /// Container for tag spans.
    Tags,
    /// A single tag label.
    Tag,
    /// Editable text box opened over a topic.
    Editor,
}

bitflags::bitflags! {
    /// Boolean element attributes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element can be picked up for drag-and-drop.
        const DRAGGABLE        = 0b0000_0001;
        /// Element content is editable by the user.
        const CONTENT_EDITABLE = 0b0000_0010;
        /// Spell checking is enabled for editable content.
        const SPELLCHECK       = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Input events a host should forward for an element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventMask: u8 {
        /// Key presses while the element has focus.
        const KEY_DOWN = 0b0000_0001;
        /// The element losing input focus.
        const BLUR     = 0b0000_0010;
    }
}

/// Presentation-only attributes applied to a topic element.
///
/// Values are already in surface notation (for example `"18px"` for a font size).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Foreground color.
    pub color: Option<String>,
    /// Background color.
    pub background: Option<String>,
    /// Font size, including its unit.
    pub font_size: Option<String>,
    /// Font weight.
    pub font_weight: Option<String>,
}
