// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural guard for documents handed to the layout engine.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::node::MindNode;

/// A structural violation found by [`validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureError {
    /// Two reachable nodes share this id.
    DuplicateId(String),
    /// The node `id` sits at `depth` (root is depth 0), beyond the allowed maximum.
    TooDeep {
        /// Id of the first node found past the limit.
        id: String,
        /// Its depth.
        depth: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate node id `{id}`"),
            Self::TooDeep { id, depth } => {
                write!(f, "node `{id}` is nested {depth} levels deep")
            }
        }
    }
}

impl core::error::Error for StructureError {}

/// Check that every id reachable from `root` is unique and that no node is nested deeper
/// than `max_depth` levels below the root.
///
/// The walk is iterative so that the guard itself cannot overflow the stack on the
/// documents it exists to reject. Nodes are visited in document order and the first
/// violation wins.
pub fn validate(root: &MindNode, max_depth: usize) -> Result<(), StructureError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&MindNode, usize)> = Vec::new();
    stack.push((root, 0));
    while let Some((node, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(StructureError::TooDeep {
                id: node.id.clone(),
                depth,
            });
        }
        if !seen.insert(node.id.as_str()) {
            return Err(StructureError::DuplicateId(node.id.clone()));
        }
        // Reverse so the first child is popped first.
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    fn chain(len: usize) -> MindNode {
        let mut node = MindNode::new(format!("n{len}"), "leaf");
        for i in (0..len).rev() {
            node = MindNode::new(format!("n{i}"), "link").with_child(node);
        }
        node
    }

    #[test]
    fn accepts_well_formed_tree() {
        let root = MindNode::new("r", "root")
            .with_child(MindNode::new("a", "a").with_child(MindNode::new("b", "b")))
            .with_child(MindNode::new("c", "c"));
        assert_eq!(validate(&root, 8), Ok(()));
    }

    #[test]
    fn reports_first_duplicate_in_document_order() {
        let root = MindNode::new("r", "root")
            .with_child(MindNode::new("a", "a").with_child(MindNode::new("x", "first")))
            .with_child(MindNode::new("x", "second"))
            .with_child(MindNode::new("a", "third"));
        assert_eq!(
            validate(&root, 8),
            Err(StructureError::DuplicateId("x".to_string()))
        );
    }

    #[test]
    fn root_id_counts_as_used() {
        let root = MindNode::new("r", "root").with_child(MindNode::new("r", "clash"));
        assert_eq!(
            validate(&root, 8),
            Err(StructureError::DuplicateId("r".to_string()))
        );
    }

    #[test]
    fn depth_limit_is_inclusive() {
        assert_eq!(validate(&chain(4), 4), Ok(()));
        assert_eq!(
            validate(&chain(5), 4),
            Err(StructureError::TooDeep {
                id: "n5".to_string(),
                depth: 5,
            })
        );
    }

    #[test]
    fn display_names_the_offending_node() {
        let err = StructureError::DuplicateId("x".to_string());
        assert_eq!(err.to_string(), "duplicate node id `x`");
    }
}
