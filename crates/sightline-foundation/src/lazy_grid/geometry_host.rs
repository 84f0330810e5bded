//! Host geometry abstraction.
//!
//! The grid never walks a concrete element tree. Everything it needs to know
//! about its surroundings (containment chain, overflow style, boxes, scroll
//! offsets and event sources) comes through [`GeometryHost`], so the same core
//! runs against a browser DOM, a native toolkit or a headless test host.

use super::{SignalQueue, Subscription};
use sightline_ui_geometry::Rect;

/// Vertical overflow behavior of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether a container with this overflow owns a scrollable viewport.
    #[inline]
    pub fn is_scrollable(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }

    /// Parses a CSS `overflow-y` value. Unknown values are treated as visible.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Overflow::Auto,
            "scroll" => Overflow::Scroll,
            "hidden" => Overflow::Hidden,
            "clip" => Overflow::Clip,
            _ => Overflow::Visible,
        }
    }
}

/// Geometry queries and event sources of the environment hosting a grid.
///
/// Rects are in viewport coordinates (like `getBoundingClientRect`), so they
/// move as ancestors scroll. Listener registrations return `None` when the
/// host lacks the capability; the grid then renders without windowing.
pub trait GeometryHost {
    /// Handle to an element of the host's containment tree.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The containing element of `node`, or `None` at the top of the tree.
    fn parent_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Computed vertical overflow of `node`.
    fn overflow_y(&self, node: &Self::Node) -> Overflow;

    /// The element that scrolls the whole document, if the host has one.
    fn root_scroller(&self) -> Option<Self::Node>;

    /// Border box of `node` in viewport coordinates.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Current vertical scroll offset of `node`.
    fn scroll_top(&self, node: &Self::Node) -> f32;

    /// Height of the visible content area of `node`.
    fn client_height(&self, node: &Self::Node) -> f32;

    /// Width of the content area of `node`.
    fn client_width(&self, node: &Self::Node) -> f32;

    /// Width of the host window, if there is one.
    fn window_width(&self) -> Option<f32>;

    /// Forwards scroll events of `node` as [`GridSignal::Scroll`](super::GridSignal::Scroll).
    fn on_scroll(&self, node: &Self::Node, signals: SignalQueue) -> Option<Subscription>;

    /// Forwards window resizes as [`GridSignal::WindowResize`](super::GridSignal::WindowResize).
    fn on_window_resize(&self, signals: SignalQueue) -> Option<Subscription>;

    /// Forwards box size changes of `node` as
    /// [`GridSignal::ContainerResize`](super::GridSignal::ContainerResize).
    fn observe_size(&self, node: &Self::Node, signals: SignalQueue) -> Option<Subscription>;
}

/// Upper bound on the containment chain walk; a longer chain means the host
/// reported a cycle.
pub const MAX_ANCESTOR_DEPTH: usize = 4096;

/// Finds the nearest ancestor of `node` whose vertical overflow scrolls,
/// falling back to the host's root scroller.
pub fn find_scroll_parent<H: GeometryHost>(host: &H, node: &H::Node) -> Option<H::Node> {
    let mut current = host.parent_of(node);
    let mut depth = 0;
    while let Some(candidate) = current {
        if host.overflow_y(&candidate).is_scrollable() {
            return Some(candidate);
        }
        depth += 1;
        if depth >= MAX_ANCESTOR_DEPTH {
            log::warn!(
                "gave up looking for a scroll parent after {} ancestors",
                MAX_ANCESTOR_DEPTH
            );
            break;
        }
        current = host.parent_of(&candidate);
    }
    host.root_scroller()
}
