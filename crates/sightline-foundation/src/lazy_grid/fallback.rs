//! Windowed vs. full rendering decision.

use sightline_ui_layout::GridMetrics;

/// Why a grid renders every item instead of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The host cannot report a scroll parent or observe it.
    MeasurementUnavailable,
    /// Item width or row height is not positive, e.g. before the first
    /// measurement.
    DegenerateLayout,
    /// Too few items for windowing to pay for its bookkeeping.
    SmallCollection,
}

/// How a grid renders its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Only the visible window, absolutely positioned.
    Windowed,
    /// Every item in normal flow.
    Full(FallbackReason),
}

impl RenderMode {
    pub fn is_windowed(&self) -> bool {
        matches!(self, RenderMode::Windowed)
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            RenderMode::Windowed => None,
            RenderMode::Full(reason) => Some(*reason),
        }
    }
}

/// Gate in front of the visible range selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackPolicy {
    threshold: usize,
}

impl FallbackPolicy {
    /// Collections of at most `threshold` items always render in full.
    pub const fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn decide(
        &self,
        item_count: usize,
        metrics: &GridMetrics,
        measurement_available: bool,
    ) -> RenderMode {
        if !measurement_available {
            RenderMode::Full(FallbackReason::MeasurementUnavailable)
        } else if metrics.is_degenerate() {
            RenderMode::Full(FallbackReason::DegenerateLayout)
        } else if item_count <= self.threshold {
            RenderMode::Full(FallbackReason::SmallCollection)
        } else {
            RenderMode::Windowed
        }
    }
}
