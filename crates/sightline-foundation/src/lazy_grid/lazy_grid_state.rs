//! Lazy grid lifecycle state.

use super::{FallbackReason, RenderMode};
use web_time::Instant;

/// Lifecycle phase of a lazy grid.
///
/// ```text
/// Unmeasured --first valid metrics--> Measured <--> Fallback(reason)
/// ```
///
/// There is no terminal state; fallback is always correct, merely slower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GridPhase {
    /// Mounted, but the container has not produced usable metrics yet.
    #[default]
    Unmeasured,
    /// Windowing against valid metrics.
    Measured,
    /// Rendering every item.
    Fallback(FallbackReason),
}

impl GridPhase {
    /// Phase after a recompute that chose `mode`.
    ///
    /// Degenerate metrics keep a grid that was never measured in
    /// `Unmeasured`; any other fallback is reported as such.
    pub fn next(self, mode: RenderMode) -> GridPhase {
        match (self, mode) {
            (_, RenderMode::Windowed) => GridPhase::Measured,
            (GridPhase::Unmeasured, RenderMode::Full(FallbackReason::DegenerateLayout)) => {
                GridPhase::Unmeasured
            }
            (_, RenderMode::Full(reason)) => GridPhase::Fallback(reason),
        }
    }
}

/// Diagnostic counters for a lazy grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LazyGridStats {
    /// Recomputations performed.
    pub recomputes: u64,
    /// Host notifications folded into those recomputations.
    pub signals_received: u64,
    /// Fallback decisions evaluated (not served from the cache).
    pub fallback_evaluations: u64,
}

/// Non-derived state owned by a lazy grid.
#[derive(Debug, Default)]
pub struct LazyGridState {
    phase: GridPhase,
    stats: LazyGridStats,
    last_recompute: Option<Instant>,
}

impl LazyGridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn stats(&self) -> LazyGridStats {
        self.stats
    }

    pub(crate) fn record_signals(&mut self, received: u32) {
        self.stats.signals_received += u64::from(received);
    }

    pub(crate) fn record_fallback_evaluation(&mut self) {
        self.stats.fallback_evaluations += 1;
    }

    /// Records a recompute and advances the phase.
    pub(crate) fn record_recompute(&mut self, mode: RenderMode) -> GridPhase {
        let now = Instant::now();
        if let Some(previous) = self.last_recompute {
            log::trace!(
                "grid recompute #{} ({:?} since previous)",
                self.stats.recomputes + 1,
                now.duration_since(previous)
            );
        }
        self.last_recompute = Some(now);
        self.stats.recomputes += 1;

        let next = self.phase.next(mode);
        if next != self.phase {
            log::debug!("grid phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        next
    }
}
