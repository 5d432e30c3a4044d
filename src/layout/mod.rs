//! Layout algorithms for tree charts.
//!
//! This module computes pixel positions for the visible nodes of a
//! [`TreeModel`](crate::tree::TreeModel). The stages are kept separate so each
//! can be tested on its own; [`DendrogramLayout`] chains them.

pub mod aggregate;
pub mod dendrogram;
pub mod orient;
pub mod root_distance;
pub mod traversal;

pub use aggregate::{RawPosition, Separation};
pub use dendrogram::{DendrogramConfig, DendrogramLayout, LayoutExtent, NodeLayout, TreeLayout};
pub use orient::{DepthScale, Orient, OrientMapper};
pub use root_distance::RootDistances;
pub use traversal::Traversal;
