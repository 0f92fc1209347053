// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use mindtree_model::StructureError;

/// Why a layout pass refused a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The document failed the structural guard.
    Structure(StructureError),
    /// The walk descended past the configured maximum depth.
    TooDeep {
        /// Node at which the walk stopped.
        id: String,
        /// Its depth below the root.
        depth: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(err) => write!(f, "malformed document: {err}"),
            Self::TooDeep { id, depth } => {
                write!(f, "layout stopped at node `{id}`, {depth} levels deep")
            }
        }
    }
}

impl core::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Structure(err) => Some(err),
            Self::TooDeep { .. } => None,
        }
    }
}

impl From<StructureError> for LayoutError {
    fn from(err: StructureError) -> Self {
        Self::Structure(err)
    }
}
