//! TreeModel - arena holding the hierarchy a tree chart is drawn from.
//!
//! The topology lives in petgraph's StableGraph: one node weight per tree node
//! (ordered children plus expand/collapse state) and one parent→child edge
//! per node, weighted with that node's branch length. A synthetic virtual
//! root owns the real root through an ordinary edge, so the real root is
//! reached exactly like any other child.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::HashMap;

use super::node::{NodeId, TreeNode};
use crate::error::TreeError;

/// The tree data model.
///
/// This struct manages:
/// - Tree topology via petgraph (edges carry branch lengths)
/// - Ordered child lists (insertion order is traversal order)
/// - Expand/collapse flags
/// - ID mapping between stable IDs and internal indices
pub struct TreeModel {
    /// Node weights hold the ordered children, edge weights the branch length
    /// of the edge's target.
    graph: StableGraph<TreeNode, f64, Directed>,

    /// Map from stable NodeId to petgraph NodeIndex
    node_id_to_index: HashMap<NodeId, NodeIndex>,

    /// Next node ID to assign
    next_node_id: u32,

    /// Synthetic parent of the real root
    virtual_root: NodeId,
}

impl TreeModel {
    /// Create an empty tree holding only the virtual root.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree with pre-allocated capacity for `node_capacity` nodes.
    pub fn with_capacity(node_capacity: usize) -> Self {
        let mut model = Self {
            graph: StableGraph::with_capacity(node_capacity + 1, node_capacity),
            node_id_to_index: HashMap::with_capacity(node_capacity + 1),
            next_node_id: 0,
            virtual_root: NodeId(0),
        };
        model.virtual_root = model.insert_node();
        model
    }

    fn insert_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let index = self.graph.add_node(TreeNode::new(id));
        self.node_id_to_index.insert(id, index);
        id
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex, TreeError> {
        self.node_id_to_index
            .get(&id)
            .copied()
            .ok_or(TreeError::UnknownNode(id))
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.node_id_to_index
            .get(&id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    fn validate_branch_length(branch_length: f64) -> Result<(), TreeError> {
        if branch_length.is_finite() && branch_length >= 0.0 {
            Ok(())
        } else {
            Err(TreeError::InvalidBranchLength(branch_length))
        }
    }

    fn link(&mut self, parent: NodeId, branch_length: f64) -> Result<NodeId, TreeError> {
        Self::validate_branch_length(branch_length)?;
        let parent_index = self.index_of(parent)?;

        let id = self.insert_node();
        let index = self.node_id_to_index[&id];
        self.graph.add_edge(parent_index, index, branch_length);
        if let Some(parent_node) = self.graph.node_weight_mut(parent_index) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// The synthetic node whose single child is the real root. Never drawn.
    pub fn virtual_root(&self) -> NodeId {
        self.virtual_root
    }

    /// The real root, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.node(self.virtual_root)
            .and_then(|node| node.children.first().copied())
    }

    /// Create the real root. Its own branch length is kept but never used by
    /// layout.
    pub fn set_root(&mut self, branch_length: f64) -> Result<NodeId, TreeError> {
        if self.root().is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        self.link(self.virtual_root, branch_length)
    }

    /// Append a child to `parent`; it becomes the parent's rightmost child.
    pub fn add_child(&mut self, parent: NodeId, branch_length: f64) -> Result<NodeId, TreeError> {
        if parent == self.virtual_root {
            return Err(TreeError::VirtualRoot);
        }
        self.link(parent, branch_length)
    }

    /// Remove a node together with all of its descendants.
    ///
    /// Returns the number of removed nodes. IDs of the remaining nodes stay
    /// valid.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if id == self.virtual_root {
            return Err(TreeError::VirtualRoot);
        }
        self.index_of(id)?;

        if let Some(parent) = self.graph_parent(id) {
            let parent_index = self.index_of(parent)?;
            if let Some(parent_node) = self.graph.node_weight_mut(parent_index) {
                parent_node.children.retain(|&child| child != id);
            }
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(index) = self.node_id_to_index.remove(&current) {
                if let Some(node) = self.graph.remove_node(index) {
                    stack.extend(node.children);
                }
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Parent in the underlying graph, including the virtual root.
    fn graph_parent(&self, id: NodeId) -> Option<NodeId> {
        let index = *self.node_id_to_index.get(&id)?;
        self.graph
            .edges_directed(index, Direction::Incoming)
            .next()
            .and_then(|edge| self.graph.node_weight(edge.source()))
            .map(|node| node.id)
    }

    /// Parent of a node. The real root (and the virtual root) have none.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.graph_parent(id)
            .filter(|&parent| parent != self.virtual_root)
    }

    /// Ordered children, regardless of collapse state.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Children that take part in layout: empty when the node is collapsed.
    pub fn visible_children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) if node.state.is_expanded() => node.children.as_slice(),
            _ => &[],
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Check if a node shows its children. Unknown nodes report false.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id)
            .map(|node| node.state.is_expanded())
            .unwrap_or(false)
    }

    /// Expand or collapse a node.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> Result<(), TreeError> {
        let index = self.index_of(id)?;
        if let Some(node) = self.graph.node_weight_mut(index) {
            node.state.set_expanded(expanded);
        }
        Ok(())
    }

    /// Flip the expand state, returning the new value.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let expanded = !self.is_expanded(id);
        self.set_expanded(id, expanded)?;
        Ok(expanded)
    }

    /// Weight of the edge from the node's parent. Zero for unknown nodes.
    pub fn branch_length(&self, id: NodeId) -> f64 {
        self.node_id_to_index
            .get(&id)
            .and_then(|&index| {
                self.graph
                    .edges_directed(index, Direction::Incoming)
                    .next()
                    .map(|edge| *edge.weight())
            })
            .unwrap_or(0.0)
    }

    /// Replace the weight of the edge from the node's parent.
    pub fn set_branch_length(&mut self, id: NodeId, branch_length: f64) -> Result<(), TreeError> {
        if id == self.virtual_root {
            return Err(TreeError::VirtualRoot);
        }
        Self::validate_branch_length(branch_length)?;
        let index = self.index_of(id)?;

        let edge = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .next()
            .map(|edge| edge.id())
            .ok_or(TreeError::UnknownNode(id))?;
        if let Some(weight) = self.graph.edge_weight_mut(edge) {
            *weight = branch_length;
        }
        Ok(())
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Check whether a node exists (the virtual root included).
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_id_to_index.contains_key(&id)
    }

    /// Number of real nodes, excluding the virtual root.
    pub fn node_count(&self) -> u32 {
        (self.graph.node_count() as u32).saturating_sub(1)
    }

    /// Upper bound on node IDs (max ID + 1), counting removed slots.
    pub fn node_bound(&self) -> u32 {
        self.next_node_id
    }

    /// Remove every node, leaving a fresh virtual root.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_id_to_index.clear();
        self.next_node_id = 0;
        self.virtual_root = self.insert_node();
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_no_root() {
        let tree = TreeModel::new();
        assert_eq!(tree.root(), None);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.contains(tree.virtual_root()));
    }

    #[test]
    fn test_set_root_once() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(tree.virtual_root()), &[root]);
        assert_eq!(tree.set_root(0.0), Err(TreeError::RootAlreadySet));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 2.0).unwrap();
        let c = tree.add_child(root, 3.0).unwrap();

        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.branch_length(c), 3.0);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_add_child_rejects_bad_input() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();

        assert_eq!(
            tree.add_child(root, -1.0),
            Err(TreeError::InvalidBranchLength(-1.0))
        );
        assert!(matches!(
            tree.add_child(root, f64::NAN),
            Err(TreeError::InvalidBranchLength(_))
        ));
        assert_eq!(
            tree.add_child(NodeId(99), 1.0),
            Err(TreeError::UnknownNode(NodeId(99)))
        );
        assert_eq!(
            tree.add_child(tree.virtual_root(), 1.0),
            Err(TreeError::VirtualRoot)
        );
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_collapse_hides_children() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();

        assert!(tree.is_expanded(root));
        assert_eq!(tree.visible_children(root), &[a]);

        assert_eq!(tree.toggle_expanded(root), Ok(false));
        assert!(tree.visible_children(root).is_empty());
        assert_eq!(tree.children(root), &[a]);

        tree.set_expanded(root, true).unwrap();
        assert_eq!(tree.visible_children(root), &[a]);
    }

    #[test]
    fn test_set_branch_length() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();

        tree.set_branch_length(a, 4.5).unwrap();
        assert_eq!(tree.branch_length(a), 4.5);
        assert_eq!(
            tree.set_branch_length(a, -0.5),
            Err(TreeError::InvalidBranchLength(-0.5))
        );
        assert_eq!(tree.branch_length(a), 4.5);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        let a = tree.add_child(root, 1.0).unwrap();
        let b = tree.add_child(root, 1.0).unwrap();
        let a1 = tree.add_child(a, 1.0).unwrap();
        let a2 = tree.add_child(a, 1.0).unwrap();

        assert_eq!(tree.remove_subtree(a), Ok(3));
        assert_eq!(tree.children(root), &[b]);
        assert!(!tree.contains(a1));
        assert!(!tree.contains(a2));
        assert_eq!(tree.node_count(), 2);

        // Surviving IDs stay valid and new IDs never reuse old ones
        let c = tree.add_child(root, 2.0).unwrap();
        assert!(c.raw() > a2.raw());
        assert_eq!(tree.children(root), &[b, c]);
        assert_eq!(tree.branch_length(b), 1.0);
        assert_eq!(tree.node_bound(), c.raw() + 1);
    }

    #[test]
    fn test_remove_root_allows_new_root() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        tree.add_child(root, 1.0).unwrap();

        assert_eq!(tree.remove_subtree(root), Ok(2));
        assert_eq!(tree.root(), None);
        assert_eq!(
            tree.remove_subtree(tree.virtual_root()),
            Err(TreeError::VirtualRoot)
        );
        assert!(tree.set_root(0.0).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut tree = TreeModel::new();
        let root = tree.set_root(0.0).unwrap();
        tree.add_child(root, 1.0).unwrap();

        tree.clear();
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.node_bound(), 1);
    }
}
