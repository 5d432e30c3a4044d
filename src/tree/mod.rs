//! Tree data structures and operations.
//!
//! This module provides the hierarchy a tree chart is laid out from, stored as
//! an arena on top of petgraph's StableGraph so node IDs stay stable while
//! subtrees are added, collapsed or removed.

mod model;
mod node;

pub use model::TreeModel;
pub use node::{NodeId, NodeState};
