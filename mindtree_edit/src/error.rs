// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// Why an edit request could not be carried out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// No node with this id exists in the document.
    NodeNotFound(String),
    /// The node exists but has no rendered topic, usually because an ancestor is collapsed.
    NotRendered(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "no node with id `{id}`"),
            Self::NotRendered(id) => write!(f, "node `{id}` has no rendered topic"),
        }
    }
}

impl core::error::Error for EditError {}
