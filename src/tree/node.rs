//! Node identifier and per-node flags.
//!
//! Every node of a [`TreeModel`](super::TreeModel) has:
//! - A stable unique identifier (survives removal of other subtrees)
//! - An ordered list of children
//! - Expand/collapse state (collapsed children are excluded from layout)

use std::fmt;

/// Stable node identifier.
///
/// This ID remains valid even after other subtrees are removed from the tree.
/// It wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Node state flags packed into a single byte.
///
/// The zero value means "expanded", so freshly added nodes show their
/// children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    flags: u8,
}

impl NodeState {
    const COLLAPSED: u8 = 0b0000_0001;

    /// Create a new default (expanded) node state.
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Check if the node's children take part in layout.
    #[inline]
    pub fn is_expanded(self) -> bool {
        self.flags & Self::COLLAPSED == 0
    }

    /// Set the expanded state.
    #[inline]
    pub fn set_expanded(&mut self, expanded: bool) {
        if expanded {
            self.flags &= !Self::COLLAPSED;
        } else {
            self.flags |= Self::COLLAPSED;
        }
    }
}

/// Node weight stored in the tree arena.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    pub(crate) id: NodeId,
    /// Children in insertion order, which is also the left-to-right layout order.
    pub(crate) children: Vec<NodeId>,
    pub(crate) state: NodeState,
}

impl TreeNode {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            children: Vec::new(),
            state: NodeState::new(),
        }
    }
}
