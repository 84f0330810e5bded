//! Testing utilities and headless host for Sightline

pub mod grid_assertions;
pub mod headless_host;

pub use grid_assertions::*;
pub use headless_host::*;

pub mod prelude {
    pub use crate::grid_assertions::*;
    pub use crate::headless_host::{HeadlessHost, HostCapabilities, HostNodeSpec, NodeId};
}
