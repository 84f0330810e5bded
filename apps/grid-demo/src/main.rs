//! Walks a weed catalog through the lifecycle of a virtualized grid on a
//! headless page: first mount, scrolling, a window resize across the column
//! breakpoint, shrinking below the windowing threshold and unmounting.

use sightline_foundation::prelude::*;
use sightline_foundation::{KeyFn, LazyGridStats};
use sightline_testing::DashboardPage;

struct Weed {
    slug: String,
    common_name: String,
}

fn weed_catalog(count: usize) -> Vec<Weed> {
    const NAMES: &[&str] = &[
        "Bindweed",
        "Chickweed",
        "Crabgrass",
        "Dandelion",
        "Henbit",
        "Lambsquarters",
        "Nutsedge",
        "Pigweed",
        "Plantain",
        "Purslane",
        "Ragweed",
        "Thistle",
    ];
    (0..count)
        .map(|index| {
            let name = NAMES[index % NAMES.len()];
            Weed {
                slug: format!("{}-{}", name.to_ascii_lowercase(), index / NAMES.len()),
                common_name: name.to_string(),
            }
        })
        .collect()
}

fn weed_key(weed: &Weed, _index: usize) -> ItemKey {
    ItemKey::from(weed.slug.as_str())
}

fn report(label: &str, grid: &LazyGrid<sightline_testing::HeadlessHost>, weeds: &[Weed]) {
    let frame = grid.frame();
    println!("--- {label} ---");
    println!(
        "  phase {:?}, {} columns of {}x{}",
        grid.phase(),
        frame.metrics.columns,
        frame.metrics.item_width,
        frame.metrics.item_height
    );
    let key_fn: KeyFn<'_, Weed> = &weed_key;
    let rendered = grid.render(weeds, Some(key_fn), |weed, _index, _size| {
        weed.common_name.clone()
    });
    match &rendered {
        RenderedGrid::Windowed {
            total_height,
            range,
            items,
        } => {
            println!(
                "  windowed: items {}..{} of {}, container height {}",
                range.start_index,
                range.end_index,
                weeds.len(),
                total_height
            );
            if let (Some(first), Some(last)) = (items.first(), items.last()) {
                println!(
                    "  first {} ({}) at y={}, last {} ({}) at y={}",
                    first.key, first.content, first.rect.y, last.key, last.content, last.rect.y
                );
            }
        }
        RenderedGrid::Flow { reason, items } => {
            println!("  in flow ({:?}): all {} items", reason, items.len());
        }
    }
}

fn print_stats(stats: LazyGridStats) {
    println!(
        "  {} recomputes for {} signals, {} fallback evaluations",
        stats.recomputes, stats.signals_received, stats.fallback_evaluations
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Sightline Grid Demo ===");

    let page = DashboardPage::new(1280.0, 800.0, 120.0, 1000.0);
    let mut weeds = weed_catalog(480);
    let mut grid = LazyGrid::new(
        GridConfig::default(),
        page.host.clone(),
        page.grid,
        weeds.len(),
    )?;
    report("mounted", &grid, &weeds);

    // A fling: many scroll events land between two frames.
    for step in 1..=24 {
        page.host.scroll_to(page.main, step as f32 * 150.0);
    }
    grid.on_frame();
    report("after fling", &grid, &weeds);
    print_stats(grid.stats());

    page.host.resize_window(720.0);
    page.host.resize_node(page.grid, 720.0, 0.0);
    grid.on_frame();
    report("narrow window", &grid, &weeds);

    weeds.truncate(8);
    grid.set_item_count(weeds.len());
    report("filtered to a handful", &grid, &weeds);

    grid.unmount();
    report("unmounted", &grid, &weeds);
    print_stats(grid.stats());

    log::info!("listeners left attached: {}", page.host.active_listeners());
    Ok(())
}
