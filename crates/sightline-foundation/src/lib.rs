//! Foundation elements for Sightline: the grid virtualization core

pub mod lazy_grid;

pub use lazy_grid::*;
pub use sightline_ui_geometry::{Point, Rect, Size};
pub use sightline_ui_layout::{
    compute_grid_metrics, BreakpointBasis, ColumnBreakpoints, ColumnStep, ConfigError,
    GridConfig, GridMetrics,
};

pub mod prelude {
    pub use crate::lazy_grid::{
        recompute, FallbackReason, GeometryHost, GridFrame, GridPhase, GridSignal, ItemKey,
        LazyGrid, MeasurementSnapshot, RenderMode, RenderedGrid, ScrollState, SignalQueue,
        Subscription, VisibleRange,
    };
    pub use sightline_ui_layout::prelude::*;
}
