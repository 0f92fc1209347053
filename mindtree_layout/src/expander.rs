// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expand/collapse toggle.

use mindtree_surface::{ElementKind, Surface};

/// Visual state of an expander.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpanderState {
    /// Children are shown.
    Expanded,
    /// Children are omitted from the render tree.
    Collapsed,
}

impl ExpanderState {
    /// Interpret a node's `expanded` field; absent means expanded.
    pub const fn from_flag(expanded: Option<bool>) -> Self {
        match expanded {
            Some(false) => Self::Collapsed,
            _ => Self::Expanded,
        }
    }

    /// Returns true for [`ExpanderState::Expanded`].
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// The other state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    /// Glyph shown inside the toggle.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Expanded => "-",
            Self::Collapsed => "+",
        }
    }

    /// Class carried by the toggle, if any. Only the active state is styled.
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Expanded => Some("minus"),
            Self::Collapsed => None,
        }
    }
}

/// A rendered expander.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExpanderVisual<E> {
    /// The toggle element.
    pub element: E,
    /// State it was rendered in.
    pub state: ExpanderState,
}

/// Create a detached expander element for a node's `expanded` field.
pub fn render_expander<S: Surface>(
    surface: &mut S,
    expanded: Option<bool>,
) -> ExpanderVisual<S::Element> {
    let state = ExpanderState::from_flag(expanded);
    let element = surface.create(ElementKind::Expander);
    surface.set_text(element, state.glyph());
    if let Some(class) = state.class_name() {
        surface.add_class(element, class);
    }
    ExpanderVisual { element, state }
}
