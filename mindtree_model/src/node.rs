// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document node types.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side of the map a root-level branch hangs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Direction {
    /// Branch is drawn to the left of the root.
    Left,
    /// Branch is drawn to the right of the root.
    Right,
}

impl Direction {
    /// Class name attached to a branch group laid out on this side.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Left => "left-branch",
            Self::Right => "right-branch",
        }
    }

    /// The other side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }
}

/// Returned when decoding a [`Direction`] from an out-of-range integer tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidDirection(pub u8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction tag {} (expected 0 or 1)", self.0)
    }
}

impl core::error::Error for InvalidDirection {}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Presentation attributes of a topic.
///
/// These never alter the topic text; they are handed to the rendering surface as-is.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct NodeStyle {
    /// Foreground color, in whatever notation the surface understands.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub color: Option<String>,
    /// Background color.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub background: Option<String>,
    /// Font size in pixels.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_size: Option<f32>,
    /// Font weight; `normal` when absent.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_weight: Option<String>,
}

/// One topic of a mind map, owning its subtree.
///
/// The root of a document is an ordinary `MindNode`; its `expanded` and `direction`
/// fields are not interpreted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MindNode {
    /// Identifier, unique within the document.
    pub id: String,
    /// Display text.
    pub topic: String,
    /// Ordered children. Empty means leaf.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Self>,
    /// Expand/collapse flag; `None` is treated as expanded.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub expanded: Option<bool>,
    /// Side tag for direct children of the root.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub direction: Option<Direction>,
    /// Presentation attributes.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub style: Option<NodeStyle>,
    /// Hyperlink target shown as an indicator after the text.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hyper_link: Option<String>,
    /// Icon glyphs, in display order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub icons: Vec<String>,
    /// Tag labels, in display order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub tags: Vec<String>,
}

impl MindNode {
    /// Create a leaf node with no decorations.
    pub fn new(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Set the expand/collapse flag.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    /// Set the side tag.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set presentation attributes.
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the hyperlink.
    pub fn with_hyper_link(mut self, link: impl Into<String>) -> Self {
        self.hyper_link = Some(link.into());
        self
    }

    /// Set the icon glyphs.
    pub fn with_icons<I, S>(mut self, icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.icons = icons.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tag labels.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the effective expand state: absent counts as expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded != Some(false)
    }

    /// Depth-first lookup of a node by id, including `self`.
    pub fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable depth-first lookup of a node by id, including `self`.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
