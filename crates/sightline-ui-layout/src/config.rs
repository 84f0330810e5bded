//! Grid configuration.

use crate::{BreakpointBasis, ColumnBreakpoints, ConfigError};

/// Default spacing between items, in logical pixels.
pub const DEFAULT_GAP: f32 = 16.0;

/// Default number of rows kept beyond each viewport edge.
pub const DEFAULT_OVERSCAN_ROWS: usize = 2;

/// Default item width / height ratio.
pub const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Collections at or below this size are rendered without windowing.
pub const DEFAULT_FALLBACK_THRESHOLD: usize = 12;

/// Configuration for a virtualized grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Horizontal and vertical spacing between items.
    pub gap: f32,

    /// Rows rendered beyond each edge of the viewport to mask fast scrolling.
    pub overscan_rows: usize,

    /// Item width divided by item height. Must be finite and positive.
    pub aspect_ratio: f32,

    /// Item counts at or below this render every item in normal flow.
    pub fallback_threshold: usize,

    /// Column count as a step function of width.
    pub breakpoints: ColumnBreakpoints,

    /// Which width the breakpoints are evaluated against.
    pub breakpoint_basis: BreakpointBasis,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            breakpoints: ColumnBreakpoints::default(),
            breakpoint_basis: BreakpointBasis::default(),
        }
    }
}

impl GridConfig {
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan_rows(mut self, overscan_rows: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_fallback_threshold(mut self, fallback_threshold: usize) -> Self {
        self.fallback_threshold = fallback_threshold;
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: ColumnBreakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_breakpoint_basis(mut self, basis: BreakpointBasis) -> Self {
        self.breakpoint_basis = basis;
        self
    }

    /// Checks the configuration for caller misuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::NonPositiveAspectRatio {
                aspect_ratio: self.aspect_ratio,
            });
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::InvalidGap { gap: self.gap });
        }
        self.breakpoints.validate()
    }

    /// Picks the width the breakpoints apply to.
    pub fn breakpoint_width(&self, container_width: f32, window_width: f32) -> f32 {
        match self.breakpoint_basis {
            BreakpointBasis::Window => window_width,
            BreakpointBasis::Container => container_width,
        }
    }
}
