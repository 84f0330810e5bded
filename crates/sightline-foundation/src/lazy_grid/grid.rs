//! Lazy grid driver.
//!
//! Wires the measurement tracker, layout calculator, fallback policy, visible
//! range selector and placement together. All derived values live in a
//! [`GridFrame`] produced by [`recompute`]; nothing is patched incrementally.

use super::{
    compute_visible_range, place_range, render_flow, render_windowed, FallbackPolicy,
    FallbackReason, GeometryHost, GridPhase, GridSignal, KeyFn, LazyGridState, LazyGridStats,
    MeasurementSnapshot, MeasurementTracker, RenderMode, RenderedGrid, SignalQueue, SliceItems,
    VisibleRange,
};
use sightline_ui_geometry::Size;
use sightline_ui_layout::{compute_grid_metrics, ConfigError, GridConfig, GridMetrics};

/// Everything a grid frame is derived from.
#[derive(Clone, Copy, Debug)]
pub struct GridInputs<'a> {
    pub config: &'a GridConfig,
    pub snapshot: MeasurementSnapshot,
    pub item_count: usize,
}

impl GridInputs<'_> {
    /// Metrics for the measured widths; degenerate while disabled.
    pub fn metrics(&self) -> GridMetrics {
        let (container_width, window_width) = match self.snapshot {
            MeasurementSnapshot::Disabled => (0.0, 0.0),
            MeasurementSnapshot::Measured(measurement) => {
                (measurement.container_width, measurement.window_width)
            }
        };
        let breakpoint_width = self.config.breakpoint_width(container_width, window_width);
        compute_grid_metrics(container_width, breakpoint_width, self.config)
    }
}

/// Derived state of one grid frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    pub metrics: GridMetrics,
    pub mode: RenderMode,
    /// Items to render. The whole collection in fallback mode.
    pub range: VisibleRange,
    /// Scrollable extent of the windowed container; `None` in fallback mode.
    pub total_height: Option<f32>,
}

impl GridFrame {
    fn full(metrics: GridMetrics, reason: FallbackReason, item_count: usize) -> Self {
        Self {
            metrics,
            mode: RenderMode::Full(reason),
            range: VisibleRange::full(item_count),
            total_height: None,
        }
    }
}

/// Derives a complete frame from its inputs.
///
/// Pure and total: identical inputs give identical frames, and no input
/// (unmeasured container, empty collection, disabled host) makes it fail.
pub fn recompute(inputs: &GridInputs<'_>) -> GridFrame {
    let metrics = inputs.metrics();
    let mode = FallbackPolicy::new(inputs.config.fallback_threshold).decide(
        inputs.item_count,
        &metrics,
        !inputs.snapshot.is_disabled(),
    );
    project(inputs, metrics, mode)
}

fn project(inputs: &GridInputs<'_>, metrics: GridMetrics, mode: RenderMode) -> GridFrame {
    let item_count = inputs.item_count;
    match (mode, inputs.snapshot.measurement()) {
        (RenderMode::Windowed, Some(measurement)) => GridFrame {
            metrics,
            mode,
            range: compute_visible_range(
                &measurement.scroll,
                &metrics,
                item_count,
                inputs.config.overscan_rows,
            ),
            total_height: Some(metrics.total_height(item_count)),
        },
        (RenderMode::Windowed, None) => {
            GridFrame::full(metrics, FallbackReason::MeasurementUnavailable, item_count)
        }
        (RenderMode::Full(reason), _) => GridFrame::full(metrics, reason, item_count),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DecisionKey {
    metrics: GridMetrics,
    item_count: usize,
    measurement_available: bool,
}

/// A virtualized grid bound to a host element.
///
/// Host listeners push into [`LazyGrid::signals`]; call [`LazyGrid::on_frame`]
/// once per animation frame to fold them into a single recompute, or
/// [`LazyGrid::handle_signal`] to recompute synchronously.
pub struct LazyGrid<H: GeometryHost> {
    config: GridConfig,
    tracker: MeasurementTracker<H>,
    signals: SignalQueue,
    state: LazyGridState,
    item_count: usize,
    decision: Option<(DecisionKey, RenderMode)>,
    frame: GridFrame,
}

impl<H: GeometryHost> LazyGrid<H> {
    /// Mounts a grid on `grid_node`, rejecting invalid configuration.
    pub fn new(
        config: GridConfig,
        host: H,
        grid_node: H::Node,
        item_count: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let signals = SignalQueue::new();
        let tracker = MeasurementTracker::mount(host, grid_node, signals.clone());
        let mut grid = Self {
            config,
            tracker,
            signals,
            state: LazyGridState::new(),
            item_count,
            decision: None,
            frame: GridFrame::full(
                GridMetrics::default(),
                FallbackReason::DegenerateLayout,
                item_count,
            ),
        };
        grid.recompute_now();
        Ok(grid)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Inbox for host listeners.
    pub fn signals(&self) -> SignalQueue {
        self.signals.clone()
    }

    pub fn host(&self) -> &H {
        self.tracker.host()
    }

    pub fn tracker(&self) -> &MeasurementTracker<H> {
        &self.tracker
    }

    pub fn phase(&self) -> GridPhase {
        self.state.phase()
    }

    pub fn stats(&self) -> LazyGridStats {
        self.state.stats()
    }

    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.frame.metrics
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.frame.range
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Replaces the configuration; invalid configuration leaves the grid
    /// untouched.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.decision = None;
        self.recompute_now();
        Ok(())
    }

    /// Updates the collection size. A different count is a structural change:
    /// the scroll parent is rediscovered before recomputing.
    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count == self.item_count {
            return;
        }
        log::debug!("grid item count {} -> {}", self.item_count, item_count);
        self.item_count = item_count;
        self.tracker.rebind();
        self.recompute_now();
    }

    /// Rediscovers the scroll parent, e.g. after the grid moved in the tree.
    pub fn rebind(&mut self) {
        self.tracker.rebind();
        self.recompute_now();
    }

    /// Folds every pending signal into one recompute. Returns whether
    /// anything was pending.
    pub fn on_frame(&mut self) -> bool {
        let batch = self.signals.drain();
        if batch.is_empty() {
            return false;
        }
        self.state.record_signals(batch.received);
        self.tracker.refresh();
        self.recompute_now();
        true
    }

    /// Recomputes immediately for `signal`, also consuming anything queued.
    pub fn handle_signal(&mut self, signal: GridSignal) -> &GridFrame {
        let pending = self.signals.drain();
        log::trace!("grid signal {:?} (+{} queued)", signal, pending.received);
        self.state.record_signals(pending.received.saturating_add(1));
        self.tracker.refresh();
        self.recompute_now();
        &self.frame
    }

    /// Detaches from the host. The grid keeps rendering, in full.
    pub fn unmount(&mut self) {
        self.tracker.unmount();
        self.recompute_now();
    }

    /// Renders the current frame.
    ///
    /// `items` should hold [`LazyGrid::item_count`] items; if it does not, the
    /// frame is derived again for the slice actually given so that the output
    /// stays consistent with it.
    pub fn render<T, R>(
        &self,
        items: &[T],
        key_fn: Option<KeyFn<'_, T>>,
        render: impl FnMut(&T, usize, Size) -> R,
    ) -> RenderedGrid<R> {
        let frame = if items.len() == self.item_count {
            self.frame
        } else {
            log::warn!(
                "grid rendered with {} items but sized for {}",
                items.len(),
                self.item_count
            );
            recompute(&GridInputs {
                config: &self.config,
                snapshot: self.tracker.snapshot(),
                item_count: items.len(),
            })
        };

        let provider = match key_fn {
            Some(key_fn) => SliceItems::with_key_fn(items, key_fn),
            None => SliceItems::new(items),
        };

        match (frame.mode, frame.total_height) {
            (RenderMode::Windowed, Some(total_height)) => {
                let placements = place_range(frame.range, &frame.metrics, &provider);
                render_windowed(items, placements, total_height, frame.range, render)
            }
            (RenderMode::Windowed, None) => {
                render_flow(items, &provider, FallbackReason::MeasurementUnavailable, render)
            }
            (RenderMode::Full(reason), _) => render_flow(items, &provider, reason, render),
        }
    }

    fn recompute_now(&mut self) {
        let inputs = GridInputs {
            config: &self.config,
            snapshot: self.tracker.snapshot(),
            item_count: self.item_count,
        };
        let metrics = inputs.metrics();
        let key = DecisionKey {
            metrics,
            item_count: self.item_count,
            measurement_available: !inputs.snapshot.is_disabled(),
        };

        let mode = match self.decision {
            Some((cached, mode)) if cached == key => mode,
            _ => {
                self.state.record_fallback_evaluation();
                let mode = FallbackPolicy::new(self.config.fallback_threshold).decide(
                    key.item_count,
                    &key.metrics,
                    key.measurement_available,
                );
                self.decision = Some((key, mode));
                mode
            }
        };

        self.frame = project(&inputs, metrics, mode);
        self.state.record_recompute(self.frame.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy_grid::{Measurement, ScrollState};
    use sightline_ui_layout::ColumnBreakpoints;

    fn measured(scroll: ScrollState, container_width: f32, window_width: f32) -> MeasurementSnapshot {
        MeasurementSnapshot::Measured(Measurement {
            scroll,
            container_width,
            window_width,
        })
    }

    #[test]
    fn single_column_catalog_windows_first_rows() {
        let config = GridConfig::default()
            .with_breakpoints(ColumnBreakpoints::fixed(1))
            .with_gap(16.0)
            .with_overscan_rows(2)
            .with_aspect_ratio(16.0 / 9.0);
        let frame = recompute(&GridInputs {
            config: &config,
            snapshot: measured(ScrollState::new(0.0, 0.0, 600.0), 300.0, 300.0),
            item_count: 30,
        });

        assert_eq!(frame.metrics.item_width, 300.0);
        assert_eq!(frame.metrics.item_height, 169.0);
        assert_eq!(frame.metrics.row_height, 185.0);
        assert_eq!(frame.mode, RenderMode::Windowed);
        assert_eq!(frame.range.start_index, 0);
        // rows 0..=6 are mounted
        assert_eq!(frame.range.end_index, 7);
        assert_eq!(frame.total_height, Some(30.0 * 185.0 - 16.0));
    }

    #[test]
    fn small_collection_renders_everything_at_any_scroll() {
        let config = GridConfig::default().with_fallback_threshold(12);
        for scroll_top in [0.0, 150.0, 10_000.0] {
            let frame = recompute(&GridInputs {
                config: &config,
                snapshot: measured(ScrollState::new(scroll_top, 0.0, 600.0), 1200.0, 1200.0),
                item_count: 10,
            });
            assert_eq!(frame.mode, RenderMode::Full(FallbackReason::SmallCollection));
            assert_eq!(frame.range, VisibleRange::new(0, 10));
            assert_eq!(frame.total_height, None);
        }
    }

    #[test]
    fn unmeasured_container_forces_fallback() {
        let config = GridConfig::default();
        let frame = recompute(&GridInputs {
            config: &config,
            snapshot: measured(ScrollState::new(0.0, 0.0, 600.0), 0.0, 1280.0),
            item_count: 500,
        });
        assert_eq!(frame.metrics.item_width, 0.0);
        assert_eq!(frame.mode, RenderMode::Full(FallbackReason::DegenerateLayout));
        assert_eq!(frame.range, VisibleRange::full(500));
    }

    #[test]
    fn disabled_host_forces_fallback() {
        let config = GridConfig::default();
        let frame = recompute(&GridInputs {
            config: &config,
            snapshot: MeasurementSnapshot::Disabled,
            item_count: 500,
        });
        assert_eq!(
            frame.mode,
            RenderMode::Full(FallbackReason::MeasurementUnavailable)
        );
        assert_eq!(frame.range, VisibleRange::full(500));
    }

    #[test]
    fn window_breakpoint_switches_columns() {
        let config = GridConfig::default();
        let narrow = recompute(&GridInputs {
            config: &config,
            snapshot: measured(ScrollState::new(0.0, 0.0, 600.0), 700.0, 700.0),
            item_count: 100,
        });
        let wide = recompute(&GridInputs {
            config: &config,
            snapshot: measured(ScrollState::new(0.0, 0.0, 600.0), 700.0, 1024.0),
            item_count: 100,
        });
        assert_eq!(narrow.metrics.columns, 1);
        assert_eq!(wide.metrics.columns, 3);
        assert_eq!(wide.range.start_index % 3, 0);
    }

    #[test]
    fn total_height_ignores_scroll_position() {
        let config = GridConfig::default();
        let heights: Vec<_> = [0.0, 500.0, 5_000.0]
            .into_iter()
            .map(|scroll_top| {
                recompute(&GridInputs {
                    config: &config,
                    snapshot: measured(ScrollState::new(scroll_top, 0.0, 600.0), 1000.0, 1000.0),
                    item_count: 200,
                })
                .total_height
            })
            .collect();
        assert!(heights.iter().all(|height| *height == heights[0]));
        assert!(heights[0].is_some());
    }
}
