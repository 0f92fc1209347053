// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use mindtree_edit::EditError;
use mindtree_layout::LayoutError;

/// Errors surfaced by [`MindMap`](crate::MindMap) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The layout pass rejected the document.
    Layout(LayoutError),
    /// An edit request failed.
    Edit(EditError),
    /// No node with this id exists in the document.
    NodeNotFound(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout failed: {err}"),
            Self::Edit(err) => write!(f, "edit failed: {err}"),
            Self::NodeNotFound(id) => write!(f, "no node with id `{id}`"),
        }
    }
}

impl core::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Edit(err) => Some(err),
            Self::NodeNotFound(_) => None,
        }
    }
}

impl From<LayoutError> for ViewError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<EditError> for ViewError {
    fn from(err: EditError) -> Self {
        Self::Edit(err)
    }
}
