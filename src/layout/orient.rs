//! Mapping raw `(x, depth)` pairs into viewport pixels.
//!
//! The breadth axis is normalized between the outermost leaves. The depth
//! axis is either proportional to cumulative branch length (phylogram) or to
//! the level of the node (uniform spacing). Orientation decides which pixel
//! axis each one lands on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::aggregate::RawPosition;
use crate::error::LayoutError;

/// Direction in which the tree grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orient {
    /// Root at the top, depth increases downward.
    #[serde(rename = "TB")]
    TopBottom,
    /// Root on the left, depth increases rightward.
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
}

impl Orient {
    pub fn as_str(self) -> &'static str {
        match self {
            Orient::TopBottom => "TB",
            Orient::LeftRight => "LR",
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orient {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Orient::TopBottom),
            "LR" => Ok(Orient::LeftRight),
            other => Err(LayoutError::UnsupportedOrient(other.to_string())),
        }
    }
}

/// What the depth axis measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepthScale {
    /// Proportional to cumulative branch length from the root.
    #[default]
    BranchLength,
    /// One step per tree level, the root at the axis start.
    Level,
}

/// Linearly map `value` from `domain` onto `range`.
///
/// A zero-width (or non-finite) domain maps everything to `range.0`.
pub fn linear_map(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let span = domain.1 - domain.0;
    if span == 0.0 || !span.is_finite() {
        return range.0;
    }
    (range.1 - range.0) * (value - domain.0) / span + range.0
}

/// Everything needed to place a node in the viewport.
#[derive(Debug, Clone, Copy)]
pub struct OrientMapper {
    pub orient: Orient,
    pub depth_scale: DepthScale,
    pub width: f64,
    pub height: f64,
    /// Raw x at the left edge of the breadth axis.
    pub x0: f64,
    /// Raw x at the right edge of the breadth axis.
    pub x1: f64,
    /// Raw depth of the root.
    pub root_depth: f64,
    /// Largest root distance, `None` for a tree without visible descendants.
    pub max_root_distance: Option<f64>,
}

impl OrientMapper {
    fn depth_axis_length(&self) -> f64 {
        match self.orient {
            Orient::TopBottom => self.height,
            Orient::LeftRight => self.width,
        }
    }

    fn breadth_axis_length(&self) -> f64 {
        match self.orient {
            Orient::TopBottom => self.width,
            Orient::LeftRight => self.height,
        }
    }

    /// Fraction of the breadth axis, 0 at `x0` and 1 at `x1`.
    pub fn normalized_x(&self, raw_x: f64) -> f64 {
        linear_map(raw_x, (self.x0, self.x1), (0.0, 1.0))
    }

    /// `1 - depth / root_depth`: 0 at the root, 1 at the leaves.
    pub fn normalized_depth(&self, raw_depth: f64) -> f64 {
        if self.root_depth == 0.0 {
            0.0
        } else {
            1.0 - raw_depth / self.root_depth
        }
    }

    /// Root distance rescaled onto the depth axis.
    pub fn scaled_depth(&self, root_distance: f64) -> f64 {
        match self.max_root_distance {
            Some(max) if max > 0.0 => {
                linear_map(root_distance, (0.0, max), (0.0, self.depth_axis_length()))
            }
            _ => 0.0,
        }
    }

    /// Pixel `(x, y)` for a node.
    pub fn map(&self, raw: RawPosition, root_distance: f64) -> (f64, f64) {
        let breadth = self.normalized_x(raw.x) * self.breadth_axis_length();
        let depth = match self.depth_scale {
            DepthScale::BranchLength => self.scaled_depth(root_distance),
            DepthScale::Level => self.normalized_depth(raw.depth) * self.depth_axis_length(),
        };

        match self.orient {
            Orient::TopBottom => (breadth, depth),
            Orient::LeftRight => (depth, breadth),
        }
    }
}
