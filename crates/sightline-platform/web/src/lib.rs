//! Browser geometry host.
//!
//! Implements [`GeometryHost`] over the DOM with `web-sys`: computed styles
//! for overflow, `getBoundingClientRect` for boxes, passive scroll listeners,
//! a window resize listener and a `ResizeObserver` on the grid root.

use sightline_foundation::{
    GeometryHost, GridSignal, LazyGrid, Overflow, SignalQueue, Subscription,
};
use sightline_ui_geometry::Rect;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, ResizeObserver, Window};

/// DOM-backed geometry host.
#[derive(Clone)]
pub struct WebGeometryHost {
    window: Window,
    document: Document,
}

impl WebGeometryHost {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        let document = window
            .document()
            .ok_or("should have a document on window")?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn is_root_scroller(&self, node: &Element) -> bool {
        self.document.scrolling_element().as_ref() == Some(node)
    }
}

impl GeometryHost for WebGeometryHost {
    type Node = Element;

    fn parent_of(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn overflow_y(&self, node: &Element) -> Overflow {
        match self.window.get_computed_style(node) {
            Ok(Some(style)) => style
                .get_property_value("overflow-y")
                .map(|value| Overflow::parse(&value))
                .unwrap_or_default(),
            _ => Overflow::Visible,
        }
    }

    fn root_scroller(&self) -> Option<Element> {
        self.document.scrolling_element()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn scroll_top(&self, node: &Element) -> f32 {
        f64::from(node.scroll_top()) as f32
    }

    fn client_height(&self, node: &Element) -> f32 {
        f64::from(node.client_height()) as f32
    }

    fn client_width(&self, node: &Element) -> f32 {
        f64::from(node.client_width()) as f32
    }

    fn window_width(&self) -> Option<f32> {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .map(|width| width as f32)
    }

    fn on_scroll(&self, node: &Element, signals: SignalQueue) -> Option<Subscription> {
        // The document scroller reports its scrolling on the window.
        let target: &EventTarget = if self.is_root_scroller(node) {
            self.window.as_ref()
        } else {
            node.as_ref()
        };
        listen(target, "scroll", signals, GridSignal::Scroll)
    }

    fn on_window_resize(&self, signals: SignalQueue) -> Option<Subscription> {
        listen(self.window.as_ref(), "resize", signals, GridSignal::WindowResize)
    }

    fn observe_size(&self, node: &Element, signals: SignalQueue) -> Option<Subscription> {
        let closure = Closure::wrap(Box::new(move || {
            signals.notify(GridSignal::ContainerResize);
        }) as Box<dyn FnMut()>);
        let observer = match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                log::warn!("ResizeObserver unavailable: {:?}", err);
                return None;
            }
        };
        observer.observe(node);
        Some(Subscription::new("resize-observer", move || {
            observer.disconnect();
            drop(closure);
        }))
    }
}

/// Attaches a passive listener that forwards `event` as `signal`.
fn listen(
    target: &EventTarget,
    event: &'static str,
    signals: SignalQueue,
    signal: GridSignal,
) -> Option<Subscription> {
    let closure = Closure::wrap(Box::new(move || {
        signals.notify(signal);
    }) as Box<dyn FnMut()>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("could not listen for {}: {:?}", event, err);
        return None;
    }

    let target = target.clone();
    Some(Subscription::new(event, move || {
        if let Err(err) =
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("could not remove {} listener: {:?}", event, err);
        }
    }))
}

/// How a stopped loop gives up its frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CallbackRelease {
    Now,
    /// The callback is on the stack; free it once it has returned.
    NextFrame,
}

/// Lifecycle flags shared by a [`FrameLoop`] and its frame callback.
#[derive(Debug, Default)]
struct FrameLoopState {
    in_callback: Cell<bool>,
    stopped: Cell<bool>,
}

impl FrameLoopState {
    /// Marks the callback as running. Returns false once the loop stopped.
    fn enter(&self) -> bool {
        if self.stopped.get() {
            return false;
        }
        self.in_callback.set(true);
        true
    }

    /// Marks the callback as finished. Returns whether to request another frame.
    fn leave(&self) -> bool {
        self.in_callback.set(false);
        !self.stopped.get()
    }

    fn stop(&self) -> CallbackRelease {
        self.stopped.set(true);
        if self.in_callback.get() {
            CallbackRelease::NextFrame
        } else {
            CallbackRelease::Now
        }
    }
}

/// A running `requestAnimationFrame` loop. Dropping it stops the loop.
///
/// Dropping it from inside `on_update` is allowed: the loop stops
/// rescheduling and the frame callback is freed on the following frame,
/// after it has returned.
pub struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    state: Rc<FrameLoopState>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        // The callback holds a handle to its own cell; break the cycle.
        match self.state.stop() {
            CallbackRelease::Now => {
                self.callback.borrow_mut().take();
            }
            CallbackRelease::NextFrame => {
                let callback = self.callback.clone();
                let release = Closure::once_into_js(move || {
                    callback.borrow_mut().take();
                });
                if let Err(err) = self.window.request_animation_frame(release.unchecked_ref()) {
                    log::warn!("frame callback leaked, could not defer release: {:?}", err);
                }
            }
        }
    }
}

/// Folds the grid's pending signals once per animation frame and calls
/// `on_update` whenever that produced a new frame.
pub fn drive_frames<F>(
    grid: Rc<RefCell<LazyGrid<WebGeometryHost>>>,
    mut on_update: F,
) -> Result<FrameLoop, JsValue>
where
    F: FnMut(&LazyGrid<WebGeometryHost>) + 'static,
{
    let window = web_sys::window().ok_or("no global window exists")?;
    let handle = Rc::new(Cell::new(None));
    let state = Rc::new(FrameLoopState::default());
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let next_callback = callback.clone();
    let next_handle = handle.clone();
    let frame_state = state.clone();
    let frame_window = window.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_state.enter() {
            return;
        }
        next_handle.set(None);
        let changed = grid.borrow_mut().on_frame();
        if changed {
            on_update(&grid.borrow());
        }
        if !frame_state.leave() {
            return;
        }
        if let Some(next) = next_callback.borrow().as_ref() {
            match frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                Ok(id) => next_handle.set(Some(id)),
                Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = callback.borrow().as_ref() {
        handle.set(Some(
            window.request_animation_frame(first.as_ref().unchecked_ref())?,
        ));
    }

    Ok(FrameLoop {
        window,
        handle,
        state,
        callback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_releases_its_callback_immediately() {
        let state = FrameLoopState::default();
        assert!(state.enter());
        assert!(state.leave());

        assert_eq!(state.stop(), CallbackRelease::Now);
        assert!(!state.enter());
    }

    #[test]
    fn stopping_inside_the_callback_defers_release() {
        let state = FrameLoopState::default();
        assert!(state.enter());
        // The update handler drops the loop.
        assert_eq!(state.stop(), CallbackRelease::NextFrame);
        assert!(!state.leave(), "a stopped loop must not request another frame");
        assert!(!state.enter());
    }
}
