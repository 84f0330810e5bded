//! Layout calculator: container width + configuration to grid metrics.

use crate::GridConfig;
use sightline_ui_geometry::{Rect, Size};

/// Derived geometry of a uniform grid.
///
/// Metrics with `item_width <= 0` or `row_height <= 0` are degenerate: the
/// container has not been measured yet (or is too narrow) and nothing may be
/// windowed against them.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GridMetrics {
    pub columns: usize,
    pub item_width: f32,
    pub item_height: f32,
    pub row_height: f32,
    pub gap: f32,
}

impl GridMetrics {
    /// Computes metrics for a known column count.
    ///
    /// A non-positive or non-finite `container_width` yields `item_width == 0`.
    pub fn compute(container_width: f32, columns: usize, gap: f32, aspect_ratio: f32) -> Self {
        let columns = columns.max(1);
        let available = if container_width.is_finite() && container_width > 0.0 {
            container_width - gap * (columns - 1) as f32
        } else {
            0.0
        };
        let item_width = (available / columns as f32).floor().max(0.0);
        let item_height = if item_width > 0.0 {
            (item_width / aspect_ratio).round()
        } else {
            0.0
        };

        Self {
            columns,
            item_width,
            item_height,
            row_height: item_height + gap,
            gap,
        }
    }

    /// Returns true when windowing must not be attempted against these metrics.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.columns == 0 || self.item_width <= 0.0 || self.row_height <= 0.0
    }

    /// Size allocated to every item.
    pub fn item_size(&self) -> Size {
        Size::new(self.item_width, self.item_height)
    }

    /// Number of rows needed for `item_count` items.
    pub fn total_rows(&self, item_count: usize) -> usize {
        if self.columns == 0 {
            return 0;
        }
        item_count.div_ceil(self.columns)
    }

    /// Full scrollable extent: every row plus the gaps between them.
    pub fn total_height(&self, item_count: usize) -> f32 {
        let rows = self.total_rows(item_count);
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.row_height - self.gap
    }

    /// Absolute position of the item at `index`, relative to the grid origin.
    pub fn item_rect(&self, index: usize) -> Rect {
        let columns = self.columns.max(1);
        let row = index / columns;
        let col = index % columns;
        Rect::new(
            col as f32 * (self.item_width + self.gap),
            row as f32 * self.row_height,
            self.item_width,
            self.item_height,
        )
    }
}

/// Derives metrics from the measured widths and the configuration.
///
/// `breakpoint_width` is the width the column step function is evaluated
/// against; see [`GridConfig::breakpoint_width`].
pub fn compute_grid_metrics(
    container_width: f32,
    breakpoint_width: f32,
    config: &GridConfig,
) -> GridMetrics {
    let columns = config.breakpoints.columns_for(breakpoint_width);
    let metrics = GridMetrics::compute(container_width, columns, config.gap, config.aspect_ratio);
    if metrics.is_degenerate() {
        log::trace!(
            "grid metrics degenerate for container width {} ({} columns)",
            container_width,
            columns
        );
    }
    metrics
}
