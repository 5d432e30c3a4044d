//! Raw positions before normalization.
//!
//! Leaves are spread along the x axis by an adjacent-pair scan: the first
//! leaf sits at 0 and each following leaf one separation further right.
//! Internal nodes then take the mean x of their children, and a depth proxy
//! that counts levels up from the deepest leaf below them.

use std::collections::HashMap;

use super::traversal::Traversal;
use crate::tree::{NodeId, TreeModel};

/// Gap between two neighbouring leaves.
///
/// Siblings get `sibling`, leaves from different parents get `cousin`, which
/// keeps separate subtrees visibly apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub sibling: f64,
    pub cousin: f64,
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            sibling: 1.0,
            cousin: 2.0,
        }
    }
}

impl Separation {
    /// Gap between `a` and `b`.
    pub fn between(&self, tree: &TreeModel, a: NodeId, b: NodeId) -> f64 {
        if tree.parent(a) == tree.parent(b) {
            self.sibling
        } else {
            self.cousin
        }
    }
}

/// Pre-normalization coordinates of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Leaf index scaled by separation; mean of children for internal nodes.
    pub x: f64,
    /// 0 for leaves, 1 + max child depth otherwise.
    pub depth: f64,
}

/// Compute raw positions for every node of `traversal`.
pub fn aggregate(
    tree: &TreeModel,
    traversal: &Traversal,
    separation: &Separation,
) -> HashMap<NodeId, RawPosition> {
    let mut positions = HashMap::with_capacity(traversal.len());

    let leaves = traversal.leaves();
    let mut x = 0.0;
    if let Some(&first) = leaves.first() {
        positions.insert(first, RawPosition { x, depth: 0.0 });
    }
    for pair in leaves.windows(2) {
        let (previous, leaf) = (pair[0], pair[1]);
        x += separation.between(tree, leaf, previous);
        positions.insert(leaf, RawPosition { x, depth: 0.0 });
    }

    for node in traversal.bottom_up() {
        let children = tree.visible_children(node);
        if children.is_empty() {
            continue;
        }

        let mut sum_x = 0.0;
        let mut max_depth = 0.0_f64;
        for child in children {
            // Children were visited first, so they are always present
            if let Some(child_position) = positions.get(child) {
                sum_x += child_position.x;
                max_depth = max_depth.max(child_position.depth);
            }
        }
        positions.insert(
            node,
            RawPosition {
                x: sum_x / children.len() as f64,
                depth: 1.0 + max_depth,
            },
        );
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tree: &TreeModel, root: NodeId) -> HashMap<NodeId, RawPosition> {
        let traversal = Traversal::visible(tree, root);
        aggregate(tree, &traversal, &Separation::default())
    }

    #[test]
    fn test_two_leaves_under_root() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 2.0).unwrap();

        let positions = raw(&tree, root);
        assert_eq!(positions[&a], RawPosition { x: 0.0, depth: 0.0 });
        assert_eq!(positions[&b], RawPosition { x: 1.0, depth: 0.0 });
        assert_eq!(positions[&root], RawPosition { x: 0.5, depth: 1.0 });
    }

    #[test]
    fn test_cousins_are_twice_as_far_apart() {
        // root → [lone, inner → [p, q]]
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let lone = tree.add_child(root, 1.0).unwrap();
        let inner = tree.add_child(root, 1.0).unwrap();
        let p = tree.add_child(inner, 1.0).unwrap();
        let q = tree.add_child(inner, 1.0).unwrap();

        let positions = raw(&tree, root);
        assert_eq!(positions[&lone].x, 0.0);
        assert_eq!(positions[&p].x, 2.0);
        assert_eq!(positions[&q].x, 3.0);
        assert_eq!(positions[&inner].x, 2.5);
        assert_eq!(positions[&inner].depth, 1.0);
        assert_eq!(positions[&root].x, 1.25);
        assert_eq!(positions[&root].depth, 2.0);
    }

    #[test]
    fn test_depth_follows_deepest_child() {
        // root → [a → [a1 → [a11]], b]
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 1.0).unwrap();
        let a1 = tree.add_child(a, 1.0).unwrap();
        tree.add_child(a1, 1.0).unwrap();

        let positions = raw(&tree, root);
        assert_eq!(positions[&a1].depth, 1.0);
        assert_eq!(positions[&a].depth, 2.0);
        assert_eq!(positions[&b].depth, 0.0);
        assert_eq!(positions[&root].depth, 3.0);
    }

    #[test]
    fn test_custom_separation() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 1.0).unwrap();

        let traversal = Traversal::visible(&tree, root);
        let separation = Separation {
            sibling: 10.0,
            cousin: 30.0,
        };
        let positions = aggregate(&tree, &traversal, &separation);
        assert_eq!(positions[&a].x, 0.0);
        assert_eq!(positions[&b].x, 10.0);
        assert_eq!(positions[&root].x, 5.0);
    }

    #[test]
    fn test_collapsed_subtree_is_one_leaf() {
        // root → [a → [a1, a2], b], a collapsed
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 1.0).unwrap();
        let a1 = tree.add_child(a, 1.0).unwrap();
        tree.add_child(a, 1.0).unwrap();
        tree.set_expanded(a, false).unwrap();

        let positions = raw(&tree, root);
        assert_eq!(positions.len(), 3);
        assert!(!positions.contains_key(&a1));
        assert_eq!(positions[&a], RawPosition { x: 0.0, depth: 0.0 });
        assert_eq!(positions[&b].x, 1.0);
    }
}
