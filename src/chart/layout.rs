//! Layout pass over every tree series of a chart.

use tracing::{debug, debug_span, warn};

use super::viewport::{view_rect, ViewportProvider};
use super::{ChartModel, TreeSeries};
use crate::layout::DendrogramLayout;

/// Lay out every tree series of `chart` against the provider's container.
///
/// Each series gets its viewport (`layout_info`) and node positions
/// (`layout`) recomputed from scratch; other series are left alone.
pub fn tree_layout(chart: &mut ChartModel, provider: &impl ViewportProvider) {
    for series in chart.each_tree_series_mut() {
        layout_series(series, provider);
    }
}

/// Lay out a single tree series.
///
/// A series whose options cannot produce a layout is skipped and keeps no
/// stale positions.
pub fn layout_series(series: &mut TreeSeries, provider: &impl ViewportProvider) {
    let _span = debug_span!("tree_layout", series = %series.name).entered();

    let rect = view_rect(&series.options.margins, provider);
    series.layout_info = Some(rect);

    match DendrogramLayout::new(series.options.dendrogram_config()) {
        Ok(layout) => {
            let result = layout.compute(&series.tree, rect.width, rect.height);
            debug!(
                nodes = result.len(),
                width = rect.width,
                height = rect.height,
                "laid out tree series"
            );
            series.layout = Some(result);
        }
        Err(err) => {
            warn!(%err, "skipping tree series with invalid layout options");
            series.layout = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BoxMargins, ContainerSize, Length, Series, TreeSeriesOptions};
    use crate::tree::TreeModel;

    fn no_margins() -> TreeSeriesOptions {
        TreeSeriesOptions {
            margins: BoxMargins::uniform(Length::Pixels(0.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_options_clear_layout() {
        let mut tree = TreeModel::new();
        tree.set_root(0.0).unwrap();
        let mut series = TreeSeries::new("t", tree, no_margins());

        layout_series(&mut series, &ContainerSize::new(100.0, 100.0));
        assert!(series.layout().is_some());

        series.options.subtree_separation = -1.0;
        layout_series(&mut series, &ContainerSize::new(100.0, 100.0));
        assert!(series.layout().is_none());
        assert!(series.layout_info().is_some());
    }

    #[test]
    fn test_skips_other_series() {
        let mut chart = ChartModel::new();
        chart.add_series(Series::Other {
            series_type: "bar".to_string(),
        });
        let mut tree = TreeModel::new();
        tree.set_root(0.0).unwrap();
        let index = chart.add_series(Series::Tree(TreeSeries::new("t", tree, no_margins())));

        tree_layout(&mut chart, &ContainerSize::new(50.0, 40.0));

        let series = chart.tree_series(index).unwrap();
        assert_eq!(series.layout().map(|l| l.len()), Some(1));
        assert_eq!(series.layout_info().map(|r| (r.width, r.height)), Some((50.0, 40.0)));
    }
}
