use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sightline_foundation::{
    compute_visible_range, recompute, GridConfig, GridInputs, GridMetrics, LazyGrid, Measurement,
    MeasurementSnapshot, ScrollState,
};
use sightline_testing::DashboardPage;

const ITEM_COUNT_SAMPLES: &[usize] = &[100, 10_000, 1_000_000];
const CONTAINER_WIDTH: f32 = 1200.0;
const VIEWPORT_HEIGHT: f32 = 900.0;

fn bench_visible_range(c: &mut Criterion) {
    let metrics = GridMetrics::compute(CONTAINER_WIDTH, 3, 16.0, 16.0 / 9.0);
    let mut group = c.benchmark_group("visible_range");
    for &item_count in ITEM_COUNT_SAMPLES {
        let middle = metrics.total_height(item_count) / 2.0;
        let scroll = ScrollState::new(middle, 0.0, VIEWPORT_HEIGHT);
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            &item_count,
            |b, &item_count| {
                b.iter(|| {
                    compute_visible_range(
                        black_box(&scroll),
                        black_box(&metrics),
                        black_box(item_count),
                        2,
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let config = GridConfig::default();
    let mut group = c.benchmark_group("grid_recompute");
    for &item_count in ITEM_COUNT_SAMPLES {
        let snapshot = MeasurementSnapshot::Measured(Measurement {
            scroll: ScrollState::new(4_000.0, 120.0, VIEWPORT_HEIGHT),
            container_width: CONTAINER_WIDTH,
            window_width: 1280.0,
        });
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            &item_count,
            |b, &item_count| {
                b.iter(|| {
                    recompute(black_box(&GridInputs {
                        config: &config,
                        snapshot,
                        item_count,
                    }))
                });
            },
        );
    }
    group.finish();
}

fn bench_scroll_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_frame");
    for &item_count in ITEM_COUNT_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            &item_count,
            |b, &item_count| {
                let page = DashboardPage::new(1280.0, VIEWPORT_HEIGHT, 120.0, CONTAINER_WIDTH);
                let mut grid = LazyGrid::new(
                    GridConfig::default(),
                    page.host.clone(),
                    page.grid,
                    item_count,
                )
                .expect("default config");
                let mut scroll_top = 0.0;
                b.iter(|| {
                    scroll_top = (scroll_top + 37.0) % 50_000.0;
                    page.host.scroll_to(page.main, scroll_top);
                    grid.on_frame();
                    black_box(grid.visible_range())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_visible_range,
    bench_recompute,
    bench_scroll_frame
);
criterion_main!(benches);
