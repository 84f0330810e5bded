//! Pure geometry primitives for Sightline
//!
//! This crate contains the point, size and rectangle types shared by the
//! layout calculator, the measurement tracker and the render orchestrator.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
