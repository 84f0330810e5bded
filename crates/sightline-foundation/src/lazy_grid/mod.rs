//! Virtualized uniform grid.
//!
//! Only the items whose row band intersects the visible part of the nearest
//! scrollable ancestor (plus a few overscan rows) are rendered, while the grid
//! reports the full collection height so the ancestor's scrollbar stays true.
//!
//! # Architecture
//!
//! - [`MeasurementTracker`] - discovers the scroll parent through a
//!   [`GeometryHost`] and republishes its geometry as [`MeasurementSnapshot`]s
//! - [`compute_grid_metrics`](crate::compute_grid_metrics) - container width to
//!   column count and item size
//! - [`FallbackPolicy`] - decides between windowed and full rendering
//! - [`compute_visible_range`] - snapshot + metrics to an index window
//! - [`place_range`] - index window to absolute item rects
//! - [`LazyGrid`] - drives the pieces above from host signals
//!
//! Every derived value is recomputed from scratch by [`recompute`], so
//! coalescing several host signals into one frame is always safe.
//!
//! # Example
//!
//! ```rust,ignore
//! use sightline_foundation::{GridConfig, LazyGrid};
//!
//! let mut grid = LazyGrid::new(GridConfig::default(), host, grid_node, weeds.len())?;
//! // host callbacks push into grid.signals(); once per animation frame:
//! grid.on_frame();
//! let rendered = grid.render(&weeds, None, |weed, index, size| card(weed, index, size));
//! ```

mod fallback;
mod geometry_host;
mod grid;
mod item_provider;
mod lazy_grid_state;
mod measurement;
mod placement;
mod signals;
mod subscription;
mod visible_range;

pub use fallback::*;
pub use geometry_host::*;
pub use grid::*;
pub use item_provider::*;
pub use lazy_grid_state::*;
pub use measurement::*;
pub use placement::*;
pub use signals::*;
pub use subscription::*;
pub use visible_range::*;
