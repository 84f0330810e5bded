//! In-memory geometry host.
//!
//! Models a containment tree of boxes laid out in document coordinates, with
//! per-node scroll offsets and listener bookkeeping, so grids can be mounted,
//! scrolled and resized without a browser.

use sightline_foundation::{GeometryHost, GridSignal, Overflow, SignalQueue, Subscription};
use sightline_ui_geometry::Rect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Handle to a node of a [`HeadlessHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Box and overflow of a headless node. `layout` is in document coordinates,
/// i.e. before any ancestor scrolling is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostNodeSpec {
    pub layout: Rect,
    pub overflow_y: Overflow,
}

impl HostNodeSpec {
    pub fn block(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            layout: Rect::new(x, y, width, height),
            overflow_y: Overflow::Visible,
        }
    }

    pub fn scrollable(self) -> Self {
        self.with_overflow(Overflow::Auto)
    }

    pub fn with_overflow(mut self, overflow_y: Overflow) -> Self {
        self.overflow_y = overflow_y;
        self
    }
}

/// Which listener kinds the host can provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostCapabilities {
    pub scroll_events: bool,
    pub resize_events: bool,
    pub size_observer: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            scroll_events: true,
            resize_events: true,
            size_observer: true,
        }
    }
}

impl HostCapabilities {
    /// A non-interactive host, e.g. server-side rendering.
    pub fn none() -> Self {
        Self {
            scroll_events: false,
            resize_events: false,
            size_observer: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerTarget {
    Scroll(NodeId),
    Window,
    Size(NodeId),
}

struct Listener {
    id: u64,
    target: ListenerTarget,
    signals: SignalQueue,
}

struct HostNode {
    parent: Option<NodeId>,
    spec: HostNodeSpec,
    scroll_top: f32,
}

#[derive(Default)]
struct HostTree {
    nodes: Vec<HostNode>,
    root_scroller: Option<NodeId>,
    window_width: Option<f32>,
    capabilities: HostCapabilities,
    listeners: Vec<Listener>,
    next_listener_id: u64,
}

impl HostTree {
    fn node(&self, id: NodeId) -> Option<&HostNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut HostNode> {
        self.nodes.get_mut(id.0)
    }

    /// Sum of the scroll offsets of every ancestor of `id`.
    fn ancestor_scroll(&self, id: NodeId) -> f32 {
        let mut total = 0.0;
        let mut current = self.node(id).and_then(|node| node.parent);
        while let Some(ancestor) = current.and_then(|ancestor| self.node(ancestor)) {
            total += ancestor.scroll_top;
            current = ancestor.parent;
        }
        total
    }
}

/// Shared handle to an in-memory element tree.
///
/// Clones share the same tree, so a test can keep one handle to drive
/// scrolling while a grid owns another.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    tree: Rc<RefCell<HostTree>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without a parent and makes it the document scroller.
    pub fn add_root(&self, spec: HostNodeSpec) -> NodeId {
        let id = self.add_node(None, spec);
        self.tree.borrow_mut().root_scroller = Some(id);
        id
    }

    pub fn add_node(&self, parent: Option<NodeId>, spec: HostNodeSpec) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = NodeId(tree.nodes.len());
        tree.nodes.push(HostNode {
            parent,
            spec,
            scroll_top: 0.0,
        });
        id
    }

    pub fn set_root_scroller(&self, root: Option<NodeId>) {
        self.tree.borrow_mut().root_scroller = root;
    }

    pub fn set_window_width(&self, width: Option<f32>) {
        self.tree.borrow_mut().window_width = width;
    }

    pub fn set_capabilities(&self, capabilities: HostCapabilities) {
        self.tree.borrow_mut().capabilities = capabilities;
    }

    pub fn set_overflow(&self, node: NodeId, overflow_y: Overflow) {
        if let Some(node) = self.tree.borrow_mut().node_mut(node) {
            node.spec.overflow_y = overflow_y;
        }
    }

    /// Moves `node` under a new parent. Listeners are not notified; callers
    /// model a structural change and rebind the grid.
    pub fn reparent(&self, node: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.tree.borrow_mut().node_mut(node) {
            node.parent = parent;
        }
    }

    /// Sets the scroll offset of `node` and fires its scroll listeners.
    pub fn scroll_to(&self, node: NodeId, scroll_top: f32) {
        if let Some(node) = self.tree.borrow_mut().node_mut(node) {
            node.scroll_top = scroll_top;
        }
        self.dispatch(ListenerTarget::Scroll(node), GridSignal::Scroll);
    }

    /// Changes the window width and fires the resize listeners.
    pub fn resize_window(&self, width: f32) {
        self.tree.borrow_mut().window_width = Some(width);
        self.dispatch(ListenerTarget::Window, GridSignal::WindowResize);
    }

    /// Changes the size of `node` and fires its size observers.
    pub fn resize_node(&self, node: NodeId, width: f32, height: f32) {
        if let Some(node) = self.tree.borrow_mut().node_mut(node) {
            node.spec.layout.width = width;
            node.spec.layout.height = height;
        }
        self.dispatch(ListenerTarget::Size(node), GridSignal::ContainerResize);
    }

    /// Moves `node` vertically in document coordinates without notifying.
    pub fn move_node(&self, node: NodeId, y: f32) {
        if let Some(node) = self.tree.borrow_mut().node_mut(node) {
            node.spec.layout.y = y;
        }
    }

    pub fn scroll_top_of(&self, node: NodeId) -> f32 {
        self.tree
            .borrow()
            .node(node)
            .map_or(0.0, |node| node.scroll_top)
    }

    /// Number of listeners currently attached.
    pub fn active_listeners(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    /// Number of scroll listeners attached to `node`.
    pub fn scroll_listeners_on(&self, node: NodeId) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.target == ListenerTarget::Scroll(node))
            .count()
    }

    fn dispatch(&self, target: ListenerTarget, signal: GridSignal) {
        let queues: Vec<SignalQueue> = self
            .tree
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.target == target)
            .map(|listener| listener.signals.clone())
            .collect();
        for queue in queues {
            queue.notify(signal);
        }
    }

    fn listen(
        &self,
        label: &'static str,
        target: ListenerTarget,
        signals: SignalQueue,
    ) -> Subscription {
        let id = {
            let mut tree = self.tree.borrow_mut();
            let id = tree.next_listener_id;
            tree.next_listener_id += 1;
            tree.listeners.push(Listener {
                id,
                target,
                signals,
            });
            id
        };
        log::trace!("attached {} listener #{} to {:?}", label, id, target);
        let tree: Weak<RefCell<HostTree>> = Rc::downgrade(&self.tree);
        Subscription::new(label, move || match tree.upgrade() {
            Some(tree) => {
                tree.borrow_mut()
                    .listeners
                    .retain(|listener| listener.id != id);
                log::trace!("detached {} listener #{}", label, id);
            }
            None => log::trace!("{} listener #{} outlived its host", label, id),
        })
    }
}

impl GeometryHost for HeadlessHost {
    type Node = NodeId;

    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().node(*node).and_then(|node| node.parent)
    }

    fn overflow_y(&self, node: &NodeId) -> Overflow {
        self.tree
            .borrow()
            .node(*node)
            .map_or(Overflow::Visible, |node| node.spec.overflow_y)
    }

    fn root_scroller(&self) -> Option<NodeId> {
        self.tree.borrow().root_scroller
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let tree = self.tree.borrow();
        match tree.node(*node) {
            Some(host_node) => host_node
                .spec
                .layout
                .translate(0.0, -tree.ancestor_scroll(*node)),
            None => Rect::new(f32::NAN, f32::NAN, f32::NAN, f32::NAN),
        }
    }

    fn scroll_top(&self, node: &NodeId) -> f32 {
        self.scroll_top_of(*node)
    }

    fn client_height(&self, node: &NodeId) -> f32 {
        self.tree
            .borrow()
            .node(*node)
            .map_or(f32::NAN, |node| node.spec.layout.height)
    }

    fn client_width(&self, node: &NodeId) -> f32 {
        self.tree
            .borrow()
            .node(*node)
            .map_or(f32::NAN, |node| node.spec.layout.width)
    }

    fn window_width(&self) -> Option<f32> {
        self.tree.borrow().window_width
    }

    fn on_scroll(&self, node: &NodeId, signals: SignalQueue) -> Option<Subscription> {
        if !self.tree.borrow().capabilities.scroll_events {
            return None;
        }
        Some(self.listen("scroll", ListenerTarget::Scroll(*node), signals))
    }

    fn on_window_resize(&self, signals: SignalQueue) -> Option<Subscription> {
        if !self.tree.borrow().capabilities.resize_events {
            return None;
        }
        Some(self.listen("resize", ListenerTarget::Window, signals))
    }

    fn observe_size(&self, node: &NodeId, signals: SignalQueue) -> Option<Subscription> {
        if !self.tree.borrow().capabilities.size_observer {
            return None;
        }
        Some(self.listen("size", ListenerTarget::Size(*node), signals))
    }
}

/// A typical page: a document root, an app shell that scrolls, a header and
/// a grid below it.
pub struct DashboardPage {
    pub host: HeadlessHost,
    pub document: NodeId,
    pub main: NodeId,
    pub grid: NodeId,
}

impl DashboardPage {
    /// `main` scrolls with a viewport of `viewport_height`; the grid starts
    /// `header_height` below its top and is `grid_width` wide.
    pub fn new(window_width: f32, viewport_height: f32, header_height: f32, grid_width: f32) -> Self {
        let host = HeadlessHost::new();
        host.set_window_width(Some(window_width));
        let document = host.add_root(HostNodeSpec::block(0.0, 0.0, window_width, viewport_height));
        let main = host.add_node(
            Some(document),
            HostNodeSpec::block(0.0, 0.0, window_width, viewport_height).scrollable(),
        );
        let section = host.add_node(
            Some(main),
            HostNodeSpec::block(0.0, 0.0, window_width, header_height),
        );
        let grid = host.add_node(
            Some(section),
            HostNodeSpec::block(0.0, header_height, grid_width, 0.0),
        );
        Self {
            host,
            document,
            main,
            grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_foundation::find_scroll_parent;

    #[test]
    fn bounding_rect_follows_ancestor_scroll() {
        let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
        assert_eq!(page.host.bounding_rect(&page.grid).y, 120.0);
        page.host.scroll_to(page.main, 300.0);
        assert_eq!(page.host.bounding_rect(&page.grid).y, -180.0);
        // The scroller's own box does not move with its content.
        assert_eq!(page.host.bounding_rect(&page.main).y, 0.0);
    }

    #[test]
    fn nearest_scrollable_ancestor_is_found() {
        let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
        assert_eq!(find_scroll_parent(&page.host, &page.grid), Some(page.main));

        page.host.set_overflow(page.main, Overflow::Hidden);
        assert_eq!(
            find_scroll_parent(&page.host, &page.grid),
            Some(page.document)
        );
    }

    #[test]
    fn dropped_subscription_detaches_listener() {
        let host = HeadlessHost::new();
        let node = host.add_root(HostNodeSpec::block(0.0, 0.0, 100.0, 100.0));
        let queue = SignalQueue::new();
        let subscription = host.on_scroll(&node, queue.clone());
        assert_eq!(host.active_listeners(), 1);

        host.scroll_to(node, 10.0);
        assert!(queue.drain().scroll);

        drop(subscription);
        assert_eq!(host.active_listeners(), 0);
        host.scroll_to(node, 20.0);
        assert!(!queue.has_pending());
    }

    #[test]
    fn subscription_outliving_the_host_releases_quietly() {
        let host = HeadlessHost::new();
        let node = host.add_root(HostNodeSpec::block(0.0, 0.0, 100.0, 100.0));
        let subscription = host
            .observe_size(&node, SignalQueue::new())
            .expect("size observer is supported");
        assert!(subscription.is_active());

        drop(host);
        drop(subscription);
    }

    #[test]
    fn missing_capabilities_refuse_listeners() {
        let host = HeadlessHost::new();
        host.set_capabilities(HostCapabilities::none());
        let node = host.add_root(HostNodeSpec::block(0.0, 0.0, 100.0, 100.0));
        assert!(host.on_scroll(&node, SignalQueue::new()).is_none());
        assert!(host.on_window_resize(SignalQueue::new()).is_none());
        assert!(host.observe_size(&node, SignalQueue::new()).is_none());
    }
}
