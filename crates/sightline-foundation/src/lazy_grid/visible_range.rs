//! Visible range selection.
//!
//! Pure projection of scroll geometry and grid metrics onto an index window.
//! The cost is constant in the number of items.

use super::ScrollState;
use sightline_ui_layout::GridMetrics;
use std::ops::Range;

/// Half-open window of item indices, `start_index <= end_index <= item_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleRange {
    pub const fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// Every item of a collection of `item_count`.
    pub const fn full(item_count: usize) -> Self {
        Self::new(0, item_count)
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..self.end_index).contains(&index)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }
}

/// Inclusive span of grid rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub first_row: usize,
    pub last_row: usize,
}

impl RowSpan {
    /// Item indices covered by these rows, clamped to `item_count`.
    pub fn to_index_range(&self, columns: usize, item_count: usize) -> VisibleRange {
        let start = self.first_row.saturating_mul(columns).min(item_count);
        let end = self
            .last_row
            .saturating_add(1)
            .saturating_mul(columns)
            .min(item_count);
        VisibleRange::new(start.min(end), end)
    }
}

/// Rows intersecting the viewport, widened by `overscan_rows` on each side
/// and clamped to the collection.
///
/// Returns `None` when no row qualifies: an empty collection, a viewport
/// entirely past either end of the grid, or degenerate metrics (which must be
/// handled by the caller before windowing; no division is attempted here).
pub fn compute_visible_rows(
    scroll: &ScrollState,
    metrics: &GridMetrics,
    item_count: usize,
    overscan_rows: usize,
) -> Option<RowSpan> {
    if item_count == 0 || metrics.is_degenerate() {
        return None;
    }

    let total_rows = metrics.total_rows(item_count) as i64;
    let row_height = f64::from(metrics.row_height);
    let overscan = i64::try_from(overscan_rows).unwrap_or(i64::MAX);
    // Not clamped: a negative top only means the grid starts below the fold.
    let viewport_top = f64::from(scroll.scroll_top) - f64::from(scroll.offset_top);
    let viewport_bottom = viewport_top + f64::from(scroll.viewport_height.max(0.0));

    // Float to int casts saturate, so extreme offsets cannot wrap.
    let first_row = ((viewport_top / row_height).floor() as i64)
        .saturating_sub(overscan)
        .max(0);
    let last_row = ((viewport_bottom / row_height).ceil() as i64)
        .saturating_add(overscan)
        .min(total_rows - 1);

    if last_row < first_row {
        return None;
    }

    Some(RowSpan {
        first_row: first_row as usize,
        last_row: last_row as usize,
    })
}

/// Index window for the current scroll position.
///
/// The window covers every row whose pixel band intersects the viewport,
/// expanded by `overscan_rows` rows per side. Degenerate metrics yield the
/// full range so that callers which skipped the fallback check still render
/// every item.
pub fn compute_visible_range(
    scroll: &ScrollState,
    metrics: &GridMetrics,
    item_count: usize,
    overscan_rows: usize,
) -> VisibleRange {
    if metrics.is_degenerate() {
        return VisibleRange::full(item_count);
    }
    match compute_visible_rows(scroll, metrics, item_count, overscan_rows) {
        Some(rows) => rows.to_index_range(metrics.columns, item_count),
        None => empty_range_near(scroll, item_count),
    }
}

/// Empty window anchored at the edge of the collection the viewport is past.
fn empty_range_near(scroll: &ScrollState, item_count: usize) -> VisibleRange {
    if scroll.viewport_top() > 0.0 {
        VisibleRange::new(item_count, item_count)
    } else {
        VisibleRange::new(0, 0)
    }
}
