//! Measurement tracker against the headless host.

use sightline_foundation::{MeasurementSnapshot, MeasurementTracker, Overflow, SignalQueue};
use sightline_testing::{DashboardPage, HeadlessHost, HostCapabilities, HostNodeSpec};

fn measurement(snapshot: MeasurementSnapshot) -> sightline_foundation::Measurement {
    match snapshot {
        MeasurementSnapshot::Measured(measurement) => measurement,
        MeasurementSnapshot::Disabled => panic!("expected a measured snapshot"),
    }
}

#[test]
fn mount_binds_nearest_scrollable_ancestor() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    let tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());

    assert_eq!(tracker.scroll_parent(), Some(&page.main));
    assert_eq!(page.host.active_listeners(), 3);

    let measured = measurement(tracker.snapshot());
    assert_eq!(measured.scroll.scroll_top, 0.0);
    assert_eq!(measured.scroll.offset_top, 120.0);
    assert_eq!(measured.scroll.viewport_height, 800.0);
    assert_eq!(measured.container_width, 1000.0);
    assert_eq!(measured.window_width, 1280.0);
}

#[test]
fn offset_top_is_stable_while_scrolling() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    let signals = SignalQueue::new();
    let mut tracker = MeasurementTracker::mount(page.host.clone(), page.grid, signals.clone());

    page.host.scroll_to(page.main, 900.0);
    assert!(signals.drain().scroll);

    let measured = measurement(tracker.refresh());
    assert_eq!(measured.scroll.scroll_top, 900.0);
    assert_eq!(measured.scroll.offset_top, 120.0);
    assert_eq!(measured.scroll.viewport_top(), 780.0);
}

#[test]
fn falls_back_to_root_scroller() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    page.host.set_overflow(page.main, Overflow::Visible);
    let mut tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert_eq!(tracker.scroll_parent(), Some(&page.document));

    page.host.scroll_to(page.document, 400.0);
    let measured = measurement(tracker.refresh());
    assert_eq!(measured.scroll.scroll_top, 400.0);
    assert_eq!(measured.scroll.offset_top, 120.0);
}

#[test]
fn no_scroll_parent_publishes_disabled() {
    let host = HeadlessHost::new();
    let orphan = host.add_node(None, HostNodeSpec::block(0.0, 0.0, 500.0, 500.0));
    let grid = host.add_node(Some(orphan), HostNodeSpec::block(0.0, 0.0, 500.0, 0.0));

    let tracker = MeasurementTracker::mount(host.clone(), grid, SignalQueue::new());
    assert!(tracker.snapshot().is_disabled());
    assert_eq!(tracker.scroll_parent(), None);
    assert_eq!(host.active_listeners(), 0);
}

#[test]
fn missing_size_observer_releases_partial_subscriptions() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    page.host.set_capabilities(HostCapabilities {
        size_observer: false,
        ..HostCapabilities::default()
    });

    let tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert!(tracker.snapshot().is_disabled());
    assert_eq!(page.host.active_listeners(), 0);
}

#[test]
fn rebind_moves_listeners_to_new_scroll_parent() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    let drawer = page.host.add_node(
        Some(page.document),
        HostNodeSpec::block(0.0, 0.0, 400.0, 600.0).scrollable(),
    );
    let mut tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert_eq!(page.host.scroll_listeners_on(page.main), 1);

    page.host.reparent(page.grid, Some(drawer));
    tracker.rebind();

    assert_eq!(tracker.scroll_parent(), Some(&drawer));
    assert_eq!(page.host.scroll_listeners_on(page.main), 0);
    assert_eq!(page.host.scroll_listeners_on(drawer), 1);
    assert_eq!(page.host.active_listeners(), 3);
}

#[test]
fn unmount_and_drop_release_every_listener() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    let mut tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    tracker.unmount();
    assert_eq!(page.host.active_listeners(), 0);
    assert!(tracker.snapshot().is_disabled());

    let tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert_eq!(page.host.active_listeners(), 3);
    drop(tracker);
    assert_eq!(page.host.active_listeners(), 0);
}

#[test]
fn non_finite_geometry_disables_measurement() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    page.host.set_window_width(Some(f32::NAN));
    let tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert!(tracker.snapshot().is_disabled());
}

#[test]
fn unmeasurable_viewport_height_disables_measurement() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    page.host.resize_node(page.main, 1280.0, f32::NAN);
    let mut tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert!(tracker.snapshot().is_disabled());

    page.host.resize_node(page.main, 1280.0, 800.0);
    tracker.refresh();
    assert_eq!(measurement(tracker.snapshot()).scroll.viewport_height, 800.0);
}

#[test]
fn windowless_host_uses_container_width() {
    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    page.host.set_window_width(None);
    let tracker = MeasurementTracker::mount(page.host.clone(), page.grid, SignalQueue::new());
    assert_eq!(measurement(tracker.snapshot()).window_width, 1000.0);
}
