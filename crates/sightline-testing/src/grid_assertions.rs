//! Brute-force oracles and assertions for grid windows.

use sightline_foundation::{RowSpan, ScrollState, VisibleRange};
use sightline_ui_layout::GridMetrics;

/// Rows whose first item's rect intersects the viewport band, found by
/// scanning every row.
pub fn rows_intersecting_viewport(
    scroll: &ScrollState,
    metrics: &GridMetrics,
    item_count: usize,
) -> Option<RowSpan> {
    let viewport_top = scroll.viewport_top();
    let viewport_bottom = viewport_top + scroll.viewport_height.max(0.0);
    let columns = metrics.columns.max(1);
    let mut rows = (0..metrics.total_rows(item_count)).filter(|&row| {
        metrics
            .item_rect(row * columns)
            .intersects_band(viewport_top, viewport_bottom)
    });
    let first_row = rows.next()?;
    let last_row = rows.last().unwrap_or(first_row);
    Some(RowSpan {
        first_row,
        last_row,
    })
}

/// Panics unless `0 <= start <= end <= item_count`.
pub fn assert_range_in_bounds(range: VisibleRange, item_count: usize) {
    assert!(
        range.start_index <= range.end_index && range.end_index <= item_count,
        "range {:?} out of bounds for {} items",
        range,
        item_count
    );
}

/// Panics unless `range` covers every row intersecting the viewport plus
/// `overscan_rows` rows per side, clamped to the collection.
pub fn assert_range_covers_viewport(
    range: VisibleRange,
    scroll: &ScrollState,
    metrics: &GridMetrics,
    item_count: usize,
    overscan_rows: usize,
) {
    assert_range_in_bounds(range, item_count);
    let Some(rows) = rows_intersecting_viewport(scroll, metrics, item_count) else {
        return;
    };
    let total_rows = metrics.total_rows(item_count);
    let wanted = RowSpan {
        first_row: rows.first_row.saturating_sub(overscan_rows),
        last_row: rows
            .last_row
            .saturating_add(overscan_rows)
            .min(total_rows - 1),
    };
    let wanted_items = wanted.to_index_range(metrics.columns, item_count);

    assert!(
        range.start_index <= wanted_items.start_index && range.end_index >= wanted_items.end_index,
        "range {:?} misses rows {:?} (items {:?}) for {:?}",
        range,
        wanted,
        wanted_items,
        scroll
    );
}
