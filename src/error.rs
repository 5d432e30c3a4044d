//! Error types for tree model mutations and layout configuration.
//!
//! Numeric degeneracies during layout (empty trees, a single leaf, zero
//! branch lengths) are never errors; they are guarded locally so every
//! visible node still receives finite coordinates.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised by [`TreeModel`](crate::tree::TreeModel) mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("{0} does not exist in the tree")]
    UnknownNode(NodeId),

    #[error("the tree already has a root")]
    RootAlreadySet,

    #[error("the virtual root cannot be modified directly")]
    VirtualRoot,

    #[error("branch length must be finite and non-negative, got {0}")]
    InvalidBranchLength(f64),
}

/// Errors raised while building or parsing a layout configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{name} separation must be finite and greater than zero, got {value}")]
    InvalidSeparation { name: &'static str, value: f64 },

    #[error("unsupported orient `{0}`, expected `TB` or `LR`")]
    UnsupportedOrient(String),

    #[error("invalid length `{0}`, expected a number or a percentage such as `12%`")]
    InvalidLength(String),
}
