//! Treeplot - WASM Module
//!
//! This module computes node positions for tree charts (org charts,
//! cladograms, phylograms) so they can be drawn as node-link diagrams. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: Tree data model (arena on petgraph's StableGraph, branch lengths
//!   on edges, expand/collapse flags)
//! - `layout`: Mean-of-children layout with branch-length depth axis
//! - `chart`: Chart model, series options and the per-series layout pass
//! - `error`: Error types for model mutations and configuration

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod chart;
pub mod error;
pub mod layout;
pub mod tree;

use chart::{layout_series, ContainerSize, TreeSeries, TreeSeriesOptions};
use tree::{NodeId, TreeModel};

/// Value written for node slots that have no position (removed or hidden
/// behind a collapsed ancestor).
pub const SENTINEL: f64 = f64::MAX;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for a single tree series.
///
/// This struct wraps a [`TreeSeries`] and provides the public API exposed to
/// JavaScript.
#[wasm_bindgen]
pub struct TreePlotWasm {
    series: TreeSeries,
}

#[wasm_bindgen]
impl TreePlotWasm {
    /// Create an empty tree with default options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            series: TreeSeries::new("tree", TreeModel::new(), TreeSeriesOptions::default()),
        }
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    /// Create the root node. Returns its stable node ID.
    #[wasm_bindgen(js_name = setRoot)]
    pub fn set_root(&mut self) -> Result<u32, JsError> {
        Ok(self.series.tree.set_root(0.0)?.raw())
    }

    /// Append a child to `parent` with the given branch length.
    ///
    /// Returns the stable node ID of the child.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(&mut self, parent: u32, branch_length: f64) -> Result<u32, JsError> {
        Ok(self.series.tree.add_child(NodeId(parent), branch_length)?.raw())
    }

    /// Remove a node and its descendants. Returns the number removed.
    #[wasm_bindgen(js_name = removeSubtree)]
    pub fn remove_subtree(&mut self, node_id: u32) -> Result<u32, JsError> {
        Ok(self.series.tree.remove_subtree(NodeId(node_id))? as u32)
    }

    /// Expand or collapse a node.
    #[wasm_bindgen(js_name = setExpanded)]
    pub fn set_expanded(&mut self, node_id: u32, expanded: bool) -> Result<(), JsError> {
        Ok(self.series.tree.set_expanded(NodeId(node_id), expanded)?)
    }

    /// Flip a node's expand state. Returns the new state.
    #[wasm_bindgen(js_name = toggleExpanded)]
    pub fn toggle_expanded(&mut self, node_id: u32) -> Result<bool, JsError> {
        Ok(self.series.tree.toggle_expanded(NodeId(node_id))?)
    }

    /// Change the branch length leading to a node.
    #[wasm_bindgen(js_name = setBranchLength)]
    pub fn set_branch_length(&mut self, node_id: u32, branch_length: f64) -> Result<(), JsError> {
        Ok(self
            .series
            .tree
            .set_branch_length(NodeId(node_id), branch_length)?)
    }

    /// Get the number of nodes in the tree.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.series.tree.node_count()
    }

    /// Get the upper bound on node IDs (max ID + 1).
    /// Sizes the array returned by `computeLayout`.
    #[wasm_bindgen(js_name = nodeBound)]
    pub fn node_bound(&self) -> u32 {
        self.series.tree.node_bound()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.series.tree.clear();
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Replace the series options from a plain JS object, e.g.
    /// `{ orient: "TB", depthScale: "level", left: "5%" }`.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsError> {
        let options: TreeSeriesOptions = serde_wasm_bindgen::from_value(options)?;
        options.dendrogram_config().validate()?;
        self.series.options = options;
        Ok(())
    }

    /// Lay out the tree inside a `width × height` container.
    ///
    /// Returns a Float64Array of positions [x0, y0, x1, y1, ...] with one
    /// (x, y) pair per node slot, in container pixels. Slots without a
    /// position hold the sentinel `Number.MAX_VALUE`.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&mut self, width: f64, height: f64) -> Float64Array {
        let positions = self.layout_positions(width, height);
        Float64Array::from(&positions[..])
    }

    /// Cumulative branch length from the root, as of the last layout.
    #[wasm_bindgen(js_name = getRootDistance)]
    pub fn get_root_distance(&self, node_id: u32) -> Option<f64> {
        self.series
            .layout()
            .and_then(|layout| layout.get(NodeId(node_id)))
            .map(|node| node.root_distance)
    }
}

impl TreePlotWasm {
    /// Interleaved positions per node slot, offset by the viewport origin.
    fn layout_positions(&mut self, width: f64, height: f64) -> Vec<f64> {
        layout_series(&mut self.series, &ContainerSize::new(width, height));

        let node_bound = self.series.tree.node_bound() as usize;
        let mut positions = vec![SENTINEL; node_bound * 2];

        if let (Some(rect), Some(layout)) = (self.series.layout_info(), self.series.layout()) {
            for (id, node) in layout.iter() {
                let slot = id.raw() as usize;
                if slot < node_bound {
                    positions[slot * 2] = rect.x + node.x;
                    positions[slot * 2 + 1] = rect.y + node.y;
                }
            }
        }

        positions
    }
}

impl Default for TreePlotWasm {
    fn default() -> Self {
        Self::new()
    }
}
