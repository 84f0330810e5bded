//! Host signals and per-frame coalescing.

use std::cell::RefCell;
use std::rc::Rc;

/// Something in the environment that may have moved or resized the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridSignal {
    /// The scroll parent scrolled.
    Scroll,
    /// The host window resized (may cross a breakpoint).
    WindowResize,
    /// The grid root's own box resized, e.g. a sidebar toggled.
    ContainerResize,
}

/// Signals received since the last drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalBatch {
    pub scroll: bool,
    pub window_resize: bool,
    pub container_resize: bool,
    /// Raw number of notifications folded into this batch.
    pub received: u32,
}

impl SignalBatch {
    pub fn is_empty(&self) -> bool {
        self.received == 0
    }

    fn record(&mut self, signal: GridSignal) {
        match signal {
            GridSignal::Scroll => self.scroll = true,
            GridSignal::WindowResize => self.window_resize = true,
            GridSignal::ContainerResize => self.container_resize = true,
        }
        self.received = self.received.saturating_add(1);
    }
}

/// Shared, single-threaded inbox that host listeners push into.
///
/// Cloning yields another handle to the same inbox. Notifications only set
/// flags; the grid drains them once per frame.
#[derive(Clone, Debug, Default)]
pub struct SignalQueue {
    pending: Rc<RefCell<SignalBatch>>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, signal: GridSignal) {
        self.pending.borrow_mut().record(signal);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Takes every pending signal, leaving the queue empty.
    pub fn drain(&self) -> SignalBatch {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}
