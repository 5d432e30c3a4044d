//! Iterative visitation of the visible part of a tree.
//!
//! A single stack walk produces an order in which every parent precedes its
//! children. Reading that order backwards yields children before parents
//! with leaves in left-to-right order, which is what bottom-up aggregation
//! needs. No recursion, so deep trees cannot overflow the call stack.

use crate::tree::{NodeId, TreeModel};

/// Visit order over the visible subtree rooted at one node.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    /// Parent-before-child order. The root comes first.
    top_down: Vec<NodeId>,
    /// Visible leaves from left to right. Collapsed nodes count as leaves.
    leaves: Vec<NodeId>,
}

impl Traversal {
    /// Walk the visible subtree below (and including) `root`.
    ///
    /// A collapsed node is visited itself but its children are skipped.
    pub fn visible(tree: &TreeModel, root: NodeId) -> Self {
        let mut top_down = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            top_down.push(node);
            // Pushed left to right, so the rightmost child is popped first
            stack.extend_from_slice(tree.visible_children(node));
        }

        let leaves = top_down
            .iter()
            .rev()
            .copied()
            .filter(|&node| tree.visible_children(node).is_empty())
            .collect();

        Self { top_down, leaves }
    }

    /// The node the walk started from, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.top_down.first().copied()
    }

    /// Parents before children.
    pub fn top_down(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.top_down.iter().copied()
    }

    /// Children before parents; leaves appear left to right.
    pub fn bottom_up(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.top_down.iter().rev().copied()
    }

    /// Visible leaves in left-to-right order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.top_down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top_down.is_empty()
    }
}
