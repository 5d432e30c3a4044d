//! Mean-of-children tree layout with optional branch-length depth axis.
//!
//! Leaves are spaced evenly from left to right (siblings closer than
//! cousins), every internal node sits above the mean position of its
//! children, and the result is stretched over a `width × height` viewport.
//! With [`DepthScale::BranchLength`] edge lengths along the depth axis are
//! proportional to branch length, as in a phylogram.
//!
//! # Algorithm Overview
//!
//! 1. **Traversal:** one iterative walk over the visible subtree gives both a
//!    top-down and a bottom-up order plus the ordered leaf sequence.
//! 2. **Aggregation (bottom-up):** raw x from leaf separation and child means,
//!    depth proxy from the deepest child.
//! 3. **Root distances (top-down):** cumulative branch length per node.
//! 4. **Normalization (top-down):** raw values to viewport pixels according
//!    to orient and depth scale.
//!
//! The tree is never mutated; the result is returned as a [`TreeLayout`].

use std::collections::HashMap;

use tracing::debug;

use super::aggregate::{aggregate, Separation};
use super::orient::{DepthScale, Orient, OrientMapper};
use super::root_distance::RootDistances;
use super::traversal::Traversal;
use crate::error::LayoutError;
use crate::tree::{NodeId, TreeModel};

/// Configuration for the dendrogram layout.
#[derive(Debug, Clone)]
pub struct DendrogramConfig {
    /// Gap between neighbouring leaves sharing a parent.
    pub sibling_separation: f64,
    /// Gap between neighbouring leaves with different parents.
    pub subtree_separation: f64,
    /// Direction in which the tree grows.
    pub orient: Orient,
    /// What the depth axis measures.
    pub depth_scale: DepthScale,
    /// Pad the breadth axis by half a separation on each side, so the outer
    /// leaves do not touch the viewport edge.
    pub leaf_margin: bool,
}

impl Default for DendrogramConfig {
    fn default() -> Self {
        Self {
            sibling_separation: 1.0,
            subtree_separation: 2.0,
            orient: Orient::LeftRight,
            depth_scale: DepthScale::BranchLength,
            leaf_margin: false,
        }
    }
}

impl DendrogramConfig {
    /// Check that both separations are usable (finite and positive).
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("sibling", self.sibling_separation),
            ("subtree", self.subtree_separation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidSeparation { name, value });
            }
        }
        Ok(())
    }

    fn separation(&self) -> Separation {
        Separation {
            sibling: self.sibling_separation,
            cousin: self.subtree_separation,
        }
    }
}

/// Final and intermediate coordinates of one visible node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// Pixel x relative to the viewport origin.
    pub x: f64,
    /// Pixel y relative to the viewport origin.
    pub y: f64,
    /// Pre-normalization breadth coordinate.
    pub raw_x: f64,
    /// Pre-normalization depth proxy (0 for leaves).
    pub raw_depth: f64,
    /// Cumulative branch length from the root.
    pub root_distance: f64,
}

/// Range the normalization was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutExtent {
    /// Raw x mapped to the start of the breadth axis.
    pub x0: f64,
    /// Raw x mapped to the end of the breadth axis.
    pub x1: f64,
    /// Largest root distance, `None` without visible descendants.
    pub max_root_distance: Option<f64>,
}

/// Result of a layout computation.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    nodes: HashMap<NodeId, NodeLayout>,
    /// Visible nodes, parents before children.
    order: Vec<NodeId>,
    extent: LayoutExtent,
}

impl TreeLayout {
    /// Layout of a visible node, `None` for hidden or unknown nodes.
    pub fn get(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.get(&id)
    }

    /// Visible nodes and their layout, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeLayout)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|layout| (*id, layout)))
    }

    /// Visible nodes, parents before children.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn extent(&self) -> LayoutExtent {
        self.extent
    }

    /// Number of visible nodes laid out.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// The dendrogram layout engine.
#[derive(Debug, Clone)]
pub struct DendrogramLayout {
    config: DendrogramConfig,
}

impl DendrogramLayout {
    /// Create a layout, rejecting unusable separations.
    pub fn new(config: DendrogramConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a dendrogram layout with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: DendrogramConfig::default(),
        }
    }

    pub fn config(&self) -> &DendrogramConfig {
        &self.config
    }

    /// Lay out the visible part of `tree` in a `width × height` viewport.
    ///
    /// A tree without a root yields an empty layout. Every visible node of a
    /// rooted tree receives finite coordinates, including single-node and
    /// zero-branch-length trees.
    pub fn compute(&self, tree: &TreeModel, width: f64, height: f64) -> TreeLayout {
        let Some(root) = tree.root() else {
            return TreeLayout::default();
        };

        let traversal = Traversal::visible(tree, root);
        let separation = self.config.separation();
        let raw = aggregate(tree, &traversal, &separation);
        let distances = RootDistances::compute(tree, &traversal);

        let leaves = traversal.leaves();
        let (Some(&leftmost), Some(&rightmost)) = (leaves.first(), leaves.last()) else {
            return TreeLayout::default();
        };
        let raw_x = |id: NodeId| raw.get(&id).map_or(0.0, |p| p.x);

        let (mut x0, mut x1) = (raw_x(leftmost), raw_x(rightmost));
        if self.config.leaf_margin {
            x0 -= separation.between(tree, leftmost, rightmost) / 2.0;
            x1 += separation.between(tree, rightmost, leftmost) / 2.0;
        }

        let mapper = OrientMapper {
            orient: self.config.orient,
            depth_scale: self.config.depth_scale,
            width,
            height,
            x0,
            x1,
            root_depth: raw.get(&root).map_or(0.0, |p| p.depth),
            max_root_distance: distances.max(),
        };

        let mut nodes = HashMap::with_capacity(traversal.len());
        let mut order = Vec::with_capacity(traversal.len());
        for id in traversal.top_down() {
            let Some(&position) = raw.get(&id) else {
                continue;
            };
            let root_distance = distances.get(id);
            let (x, y) = mapper.map(position, root_distance);
            nodes.insert(
                id,
                NodeLayout {
                    x,
                    y,
                    raw_x: position.x,
                    raw_depth: position.depth,
                    root_distance,
                },
            );
            order.push(id);
        }

        debug!(
            nodes = order.len(),
            leaves = leaves.len(),
            x0,
            x1,
            max_root_distance = ?mapper.max_root_distance,
            orient = %self.config.orient,
            "computed dendrogram layout"
        );

        TreeLayout {
            nodes,
            order,
            extent: LayoutExtent {
                x0,
                x1,
                max_root_distance: mapper.max_root_distance,
            },
        }
    }
}
