//! Chart model holding the series a layout pass runs over.
//!
//! Only tree series are laid out here; other series types are carried
//! along untouched so a host can keep one model per chart.

mod layout;
mod viewport;

pub use layout::{layout_series, tree_layout};
pub use viewport::{view_rect, BoxMargins, ContainerSize, Length, Rect, ViewportProvider};

use serde::{Deserialize, Serialize};

use crate::layout::{DendrogramConfig, DepthScale, Orient, TreeLayout};
use crate::tree::TreeModel;

/// Series type name of tree series.
pub const TREE_SERIES_TYPE: &str = "tree";

/// User-facing options of a tree series.
///
/// Keys are camelCase and every field is optional, e.g.
/// `{ "orient": "TB", "left": "5%", "leafMargin": true }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeSeriesOptions {
    pub orient: Orient,
    pub depth_scale: DepthScale,
    pub sibling_separation: f64,
    pub subtree_separation: f64,
    pub leaf_margin: bool,
    #[serde(flatten)]
    pub margins: BoxMargins,
}

impl Default for TreeSeriesOptions {
    fn default() -> Self {
        let config = DendrogramConfig::default();
        Self {
            orient: config.orient,
            depth_scale: config.depth_scale,
            sibling_separation: config.sibling_separation,
            subtree_separation: config.subtree_separation,
            leaf_margin: config.leaf_margin,
            margins: BoxMargins::default(),
        }
    }
}

impl TreeSeriesOptions {
    /// Layout configuration carried by these options.
    pub fn dendrogram_config(&self) -> DendrogramConfig {
        DendrogramConfig {
            sibling_separation: self.sibling_separation,
            subtree_separation: self.subtree_separation,
            orient: self.orient,
            depth_scale: self.depth_scale,
            leaf_margin: self.leaf_margin,
        }
    }
}

/// A tree series: the hierarchy, its options and the last computed layout.
pub struct TreeSeries {
    pub name: String,
    pub tree: TreeModel,
    pub options: TreeSeriesOptions,
    /// Viewport resolved by the last layout pass.
    layout_info: Option<Rect>,
    /// Positions from the last layout pass, relative to `layout_info`.
    layout: Option<TreeLayout>,
}

impl TreeSeries {
    pub fn new(name: impl Into<String>, tree: TreeModel, options: TreeSeriesOptions) -> Self {
        Self {
            name: name.into(),
            tree,
            options,
            layout_info: None,
            layout: None,
        }
    }

    /// Viewport resolved by the last layout pass.
    pub fn layout_info(&self) -> Option<Rect> {
        self.layout_info
    }

    /// Result of the last layout pass, `None` before the first pass or when
    /// the options were rejected.
    pub fn layout(&self) -> Option<&TreeLayout> {
        self.layout.as_ref()
    }
}

/// One series of a chart.
pub enum Series {
    Tree(TreeSeries),
    /// Any series this crate does not lay out.
    Other { series_type: String },
}

impl Series {
    pub fn series_type(&self) -> &str {
        match self {
            Series::Tree(_) => TREE_SERIES_TYPE,
            Series::Other { series_type } => series_type,
        }
    }
}

/// All series of one chart.
#[derive(Default)]
pub struct ChartModel {
    series: Vec<Series>,
}

impl ChartModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series, returning its index.
    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.series.len() - 1
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Tree series by index, `None` for other series types.
    pub fn tree_series(&self, index: usize) -> Option<&TreeSeries> {
        match self.series.get(index) {
            Some(Series::Tree(series)) => Some(series),
            _ => None,
        }
    }

    /// Mutable tree series by index, `None` for other series types.
    pub fn tree_series_mut(&mut self, index: usize) -> Option<&mut TreeSeries> {
        match self.series.get_mut(index) {
            Some(Series::Tree(series)) => Some(series),
            _ => None,
        }
    }

    /// Every tree series, in insertion order.
    pub fn each_tree_series_mut(&mut self) -> impl Iterator<Item = &mut TreeSeries> + '_ {
        self.series.iter_mut().filter_map(|series| match series {
            Series::Tree(tree) => Some(tree),
            Series::Other { .. } => None,
        })
    }
}
