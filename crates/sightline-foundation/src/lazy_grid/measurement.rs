//! Measurement tracker.
//!
//! Observes the scroll parent and the grid root through a [`GeometryHost`]
//! and republishes what it sees as immutable [`MeasurementSnapshot`]s. A
//! snapshot is replaced wholesale on every refresh, never patched.

use super::{find_scroll_parent, GeometryHost, SignalQueue, Subscription};
use smallvec::SmallVec;

/// Scroll geometry of the grid relative to its scroll parent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollState {
    /// Scroll offset of the scroll parent.
    pub scroll_top: f32,
    /// Distance from the top of the scroll parent's content to the grid root.
    pub offset_top: f32,
    /// Visible height of the scroll parent.
    pub viewport_height: f32,
}

impl ScrollState {
    pub const fn new(scroll_top: f32, offset_top: f32, viewport_height: f32) -> Self {
        Self {
            scroll_top,
            offset_top,
            viewport_height,
        }
    }

    /// Top of the viewport in grid coordinates; negative while the grid is
    /// still below the fold.
    #[inline]
    pub fn viewport_top(&self) -> f32 {
        self.scroll_top - self.offset_top
    }

    fn is_finite(&self) -> bool {
        self.scroll_top.is_finite() && self.offset_top.is_finite() && self.viewport_height.is_finite()
    }
}

/// Geometry published by a measured tracker.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Measurement {
    pub scroll: ScrollState,
    /// Content width of the grid root.
    pub container_width: f32,
    /// Width of the host window, or the container width if the host has no
    /// window.
    pub window_width: f32,
}

/// What the tracker currently knows about the environment.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MeasurementSnapshot {
    /// No scroll parent or no way to observe it; windowing is impossible.
    #[default]
    Disabled,
    Measured(Measurement),
}

impl MeasurementSnapshot {
    pub fn is_disabled(&self) -> bool {
        matches!(self, MeasurementSnapshot::Disabled)
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            MeasurementSnapshot::Disabled => None,
            MeasurementSnapshot::Measured(measurement) => Some(measurement),
        }
    }
}

/// Scroll parent plus the listeners attached for it. Dropping the binding
/// detaches every listener.
struct ScrollBinding<N> {
    scroll_parent: N,
    /// The document scroller's box scrolls with its own content, so its
    /// visible top is the viewport edge rather than its bounding rect.
    is_root_scroller: bool,
    _subscriptions: SmallVec<[Subscription; 3]>,
}

/// Tracks the geometry the visible range depends on.
pub struct MeasurementTracker<H: GeometryHost> {
    host: H,
    grid: H::Node,
    signals: SignalQueue,
    binding: Option<ScrollBinding<H::Node>>,
    snapshot: MeasurementSnapshot,
}

impl<H: GeometryHost> MeasurementTracker<H> {
    /// Discovers the scroll parent of `grid`, attaches listeners that push
    /// into `signals` and takes the first measurement.
    pub fn mount(host: H, grid: H::Node, signals: SignalQueue) -> Self {
        let mut tracker = Self {
            host,
            grid,
            signals,
            binding: None,
            snapshot: MeasurementSnapshot::Disabled,
        };
        tracker.rebind();
        tracker
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn grid_node(&self) -> &H::Node {
        &self.grid
    }

    pub fn scroll_parent(&self) -> Option<&H::Node> {
        self.binding.as_ref().map(|binding| &binding.scroll_parent)
    }

    pub fn snapshot(&self) -> MeasurementSnapshot {
        self.snapshot
    }

    /// Releases the current listeners, rediscovers the scroll parent and
    /// measures again. Call after structural changes around the grid.
    pub fn rebind(&mut self) -> MeasurementSnapshot {
        self.binding = None;
        self.binding = self.bind();
        self.refresh()
    }

    /// Detaches every listener and publishes a disabled snapshot.
    pub fn unmount(&mut self) {
        if self.binding.take().is_some() {
            log::debug!("grid tracker unmounted");
        }
        self.snapshot = MeasurementSnapshot::Disabled;
    }

    /// Re-reads the live geometry and publishes a fresh snapshot.
    pub fn refresh(&mut self) -> MeasurementSnapshot {
        let next = match &self.binding {
            Some(binding) => self.measure(binding),
            None => MeasurementSnapshot::Disabled,
        };
        if next.is_disabled() != self.snapshot.is_disabled() {
            if next.is_disabled() {
                log::debug!("grid measurement unavailable");
            } else {
                log::debug!("grid measurement available: {:?}", next);
            }
        }
        self.snapshot = next;
        next
    }

    fn bind(&self) -> Option<ScrollBinding<H::Node>> {
        let Some(scroll_parent) = find_scroll_parent(&self.host, &self.grid) else {
            log::debug!("no scroll parent for grid {:?}", self.grid);
            return None;
        };

        let mut subscriptions: SmallVec<[Subscription; 3]> = SmallVec::new();
        // Anything acquired before a missing capability is released on return.
        subscriptions.push(self.host.on_scroll(&scroll_parent, self.signals.clone())?);
        subscriptions.push(self.host.on_window_resize(self.signals.clone())?);
        subscriptions.push(self.host.observe_size(&self.grid, self.signals.clone())?);

        let is_root_scroller = self.host.root_scroller().as_ref() == Some(&scroll_parent);
        log::debug!("grid bound to scroll parent {:?}", scroll_parent);
        Some(ScrollBinding {
            scroll_parent,
            is_root_scroller,
            _subscriptions: subscriptions,
        })
    }

    fn measure(&self, binding: &ScrollBinding<H::Node>) -> MeasurementSnapshot {
        let host = &self.host;
        let scroll_parent = &binding.scroll_parent;
        let parent_top = if binding.is_root_scroller {
            0.0
        } else {
            host.bounding_rect(scroll_parent).top()
        };
        let grid_rect = host.bounding_rect(&self.grid);
        let scroll_top = host.scroll_top(scroll_parent);

        let mut scroll = ScrollState {
            scroll_top,
            offset_top: grid_rect.top() - parent_top + scroll_top,
            viewport_height: host.client_height(scroll_parent),
        };
        let container_width = host.client_width(&self.grid);
        let window_width = host.window_width().unwrap_or(container_width);

        // `f32::max` swallows NaN, so clamp only once everything is finite.
        if !scroll.is_finite() || !container_width.is_finite() || !window_width.is_finite() {
            log::warn!("host reported non-finite grid geometry; rendering without windowing");
            return MeasurementSnapshot::Disabled;
        }
        scroll.viewport_height = scroll.viewport_height.max(0.0);

        MeasurementSnapshot::Measured(Measurement {
            scroll,
            container_width,
            window_width,
        })
    }
}
