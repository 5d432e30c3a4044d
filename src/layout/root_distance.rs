//! Cumulative branch length from the root.

use std::collections::HashMap;

use super::traversal::Traversal;
use crate::tree::{NodeId, TreeModel};

/// Distance from the root for every visible node.
#[derive(Debug, Clone, Default)]
pub struct RootDistances {
    distances: HashMap<NodeId, f64>,
    /// Largest distance among visible descendants of the root. `None` when
    /// the root has none, so there is nothing to scale against.
    max: Option<f64>,
}

impl RootDistances {
    /// Walk `traversal` top-down, summing branch lengths along each path.
    ///
    /// Assumes non-negative branch lengths, which the tree model enforces.
    pub fn compute(tree: &TreeModel, traversal: &Traversal) -> Self {
        let mut distances = HashMap::with_capacity(traversal.len());
        let mut max: Option<f64> = None;

        if let Some(root) = traversal.root() {
            distances.insert(root, 0.0);
        }

        for node in traversal.top_down() {
            let base = distances.get(&node).copied().unwrap_or(0.0);
            for &child in tree.visible_children(node) {
                let distance = base + tree.branch_length(child);
                distances.insert(child, distance);
                max = Some(max.map_or(distance, |m: f64| m.max(distance)));
            }
        }

        Self { distances, max }
    }

    /// Distance of `node`, 0 for nodes outside the visible subtree.
    pub fn get(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }
}
