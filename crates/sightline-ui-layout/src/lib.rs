//! Grid layout contracts & policies for Sightline
//!
//! Everything in this crate is pure: configuration, the column step function
//! and the metrics derived from a measured container width.

mod breakpoints;
mod config;
mod error;
mod metrics;

#[cfg(test)]
mod tests;

pub use breakpoints::*;
pub use config::*;
pub use error::*;
pub use metrics::*;

pub mod prelude {
    pub use crate::breakpoints::{BreakpointBasis, ColumnBreakpoints, ColumnStep};
    pub use crate::config::GridConfig;
    pub use crate::error::ConfigError;
    pub use crate::metrics::{compute_grid_metrics, GridMetrics};
}
