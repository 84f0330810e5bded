//! Render orchestration: index windows to absolutely positioned items.

use super::{FallbackReason, ItemKey, LazyGridItemProvider, VisibleRange};
use sightline_ui_geometry::{Rect, Size};
use sightline_ui_layout::GridMetrics;

/// Position of one windowed item, relative to the grid origin.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPlacement {
    pub index: usize,
    pub key: ItemKey,
    pub rect: Rect,
}

/// Places every index of `range` at its true row/column coordinates.
pub fn place_range<P>(range: VisibleRange, metrics: &GridMetrics, provider: &P) -> Vec<GridPlacement>
where
    P: LazyGridItemProvider + ?Sized,
{
    range
        .as_range()
        .map(|index| GridPlacement {
            index,
            key: provider.get_key(index),
            rect: metrics.item_rect(index),
        })
        .collect()
}

/// A windowed item together with what the host rendered for it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem<R> {
    pub index: usize,
    pub key: ItemKey,
    pub rect: Rect,
    pub content: R,
}

/// An item rendered in normal flow.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowItem<R> {
    pub index: usize,
    pub key: ItemKey,
    pub content: R,
}

/// Output of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedGrid<R> {
    /// Only the visible window, inside a container of `total_height`.
    Windowed {
        total_height: f32,
        range: VisibleRange,
        items: Vec<PlacedItem<R>>,
    },
    /// Every item, in order, without absolute positions.
    Flow {
        reason: FallbackReason,
        items: Vec<FlowItem<R>>,
    },
}

impl<R> RenderedGrid<R> {
    pub fn is_windowed(&self) -> bool {
        matches!(self, RenderedGrid::Windowed { .. })
    }

    /// Number of items the host has to mount.
    pub fn len(&self) -> usize {
        match self {
            RenderedGrid::Windowed { items, .. } => items.len(),
            RenderedGrid::Flow { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full scrollable extent in windowed mode; `None` in normal flow, where
    /// the items size the container themselves.
    pub fn total_height(&self) -> Option<f32> {
        match self {
            RenderedGrid::Windowed { total_height, .. } => Some(*total_height),
            RenderedGrid::Flow { .. } => None,
        }
    }

    /// Indices the host mounts, in order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            RenderedGrid::Windowed { items, .. } => items.iter().map(|item| item.index).collect(),
            RenderedGrid::Flow { items, .. } => items.iter().map(|item| item.index).collect(),
        }
    }
}

/// Calls `render` for every placement, handing it the allocated item size.
pub(crate) fn render_windowed<T, R>(
    items: &[T],
    placements: Vec<GridPlacement>,
    total_height: f32,
    range: VisibleRange,
    mut render: impl FnMut(&T, usize, Size) -> R,
) -> RenderedGrid<R> {
    let items = placements
        .into_iter()
        .filter_map(|placement| {
            let item = items.get(placement.index)?;
            let content = render(item, placement.index, placement.rect.size());
            Some(PlacedItem {
                index: placement.index,
                key: placement.key,
                rect: placement.rect,
                content,
            })
        })
        .collect();
    RenderedGrid::Windowed {
        total_height,
        range,
        items,
    }
}

/// Calls `render` for every item; flow layout allocates no size up front.
pub(crate) fn render_flow<T, R, P>(
    items: &[T],
    provider: &P,
    reason: FallbackReason,
    mut render: impl FnMut(&T, usize, Size) -> R,
) -> RenderedGrid<R>
where
    P: LazyGridItemProvider + ?Sized,
{
    let items = items
        .iter()
        .enumerate()
        .map(|(index, item)| FlowItem {
            index,
            key: provider.get_key(index),
            content: render(item, index, Size::ZERO),
        })
        .collect();
    RenderedGrid::Flow { reason, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy_grid::SliceItems;

    #[test]
    fn placements_follow_rows_and_columns() {
        let metrics = GridMetrics::compute(1000.0, 3, 16.0, 16.0 / 9.0);
        let fields: Vec<u32> = (0..20).collect();
        let provider = SliceItems::new(&fields);

        let placements = place_range(VisibleRange::new(3, 8), &metrics, &provider);
        assert_eq!(placements.len(), 5);

        let first = &placements[0];
        assert_eq!(first.index, 3);
        assert_eq!(first.key, ItemKey::Index(3));
        assert_eq!(first.rect, Rect::new(0.0, 197.0, 322.0, 181.0));

        let last = &placements[4];
        assert_eq!(last.index, 7);
        assert_eq!(last.rect.x, 338.0);
        assert_eq!(last.rect.y, 394.0);
    }

    #[test]
    fn windowed_render_passes_item_size() {
        let metrics = GridMetrics::compute(300.0, 1, 16.0, 16.0 / 9.0);
        let fields = ["north", "south", "east"];
        let provider = SliceItems::new(&fields);
        let range = VisibleRange::new(1, 3);
        let placements = place_range(range, &metrics, &provider);

        let rendered = render_windowed(&fields, placements, metrics.total_height(3), range, {
            |field: &&str, index, size: Size| format!("{index}:{field}:{}x{}", size.width, size.height)
        });

        assert_eq!(rendered.total_height(), Some(3.0 * 185.0 - 16.0));
        assert_eq!(rendered.indices(), vec![1, 2]);
        match rendered {
            RenderedGrid::Windowed { items, .. } => {
                assert_eq!(items[0].content, "1:south:300x169");
            }
            RenderedGrid::Flow { .. } => panic!("expected windowed output"),
        }
    }

    #[test]
    fn flow_render_keeps_every_item_in_order() {
        let fields = ["north", "south"];
        let key_fn = |field: &&str, _index: usize| ItemKey::from(*field);
        let provider = SliceItems::with_key_fn(&fields, &key_fn);

        let rendered = render_flow(&fields, &provider, FallbackReason::SmallCollection, {
            |_field: &&str, _index, size: Size| size
        });

        assert!(!rendered.is_windowed());
        assert_eq!(rendered.total_height(), None);
        match rendered {
            RenderedGrid::Flow { reason, items } => {
                assert_eq!(reason, FallbackReason::SmallCollection);
                assert_eq!(items[1].key, ItemKey::from("south"));
                assert!(items.iter().all(|item| item.content == Size::ZERO));
            }
            RenderedGrid::Windowed { .. } => panic!("expected flow output"),
        }
    }
}
