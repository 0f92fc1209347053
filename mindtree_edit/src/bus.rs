// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications produced for an external history or link module.

use alloc::string::String;
use alloc::vec::Vec;

/// An operation announced on the event bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// An edit session opened on a node.
    BeginEdit {
        /// Node id.
        id: String,
        /// Topic text when the session opened.
        topic: String,
    },
    /// An edit session closed.
    ///
    /// Fired for every commit, including commits that left the text unchanged.
    FinishEdit {
        /// Node id.
        id: String,
        /// Topic text after the commit.
        topic: String,
        /// Topic text when the session opened.
        origin: String,
    },
}

impl Operation {
    /// Wire name of the operation.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BeginEdit { .. } => "beginEdit",
            Self::FinishEdit { .. } => "finishEdit",
        }
    }

    /// Id of the node the operation concerns.
    pub fn node_id(&self) -> &str {
        match self {
            Self::BeginEdit { id, .. } | Self::FinishEdit { id, .. } => id,
        }
    }
}

/// Receiver of [`Operation`]s.
///
/// Implemented for `Vec<Operation>`, which records, and for any `FnMut(Operation)`.
pub trait EventBus {
    /// Publish one operation.
    fn fire(&mut self, op: Operation);
}

impl EventBus for Vec<Operation> {
    fn fire(&mut self, op: Operation) {
        self.push(op);
    }
}

impl<F: FnMut(Operation)> EventBus for F {
    fn fire(&mut self, op: Operation) {
        self(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_wire_format() {
        let begin = Operation::BeginEdit {
            id: "1".into(),
            topic: "a".into(),
        };
        let finish = Operation::FinishEdit {
            id: "1".into(),
            topic: "b".into(),
            origin: "a".into(),
        };
        assert_eq!(begin.name(), "beginEdit");
        assert_eq!(finish.name(), "finishEdit");
        assert_eq!(finish.node_id(), "1");
    }

    #[test]
    fn closures_and_vectors_both_receive() {
        let mut seen: Vec<Operation> = Vec::new();
        let mut count = 0;
        {
            let mut counter = |_op: Operation| count += 1;
            counter.fire(Operation::BeginEdit {
                id: "x".into(),
                topic: "t".into(),
            });
        }
        seen.fire(Operation::BeginEdit {
            id: "y".into(),
            topic: "t".into(),
        });
        assert_eq!(count, 1);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].node_id(), "y");
    }
}
