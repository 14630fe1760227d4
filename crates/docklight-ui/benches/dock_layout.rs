//! Benchmarks for per-tick dock layout and compositing

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use docklight_ui::draw_list::build_draw_list;
use docklight_ui::{
    Color, Compositor, DockConfig, IconImage, ItemSnapshot, LayoutInputs, Theme, ThemeSpec, Vec2,
    compute_frame,
};

fn items(count: u64) -> Vec<ItemSnapshot> {
    let icon = Arc::new(IconImage::solid(48, 48, Color::rgb(0.2, 0.5, 0.9)).unwrap());
    (0..count)
        .map(|i| {
            ItemSnapshot::application(i)
                .running((i % 3) as u32)
                .active(i == 2)
                .with_icon(icon.clone())
        })
        .collect()
}

fn inputs<'a>(config: &'a DockConfig, theme: &'a Theme, items: &'a [ItemSnapshot], cursor: Option<f32>) -> LayoutInputs<'a> {
    LayoutInputs {
        config,
        theme,
        window: Vec2::new(1920.0, theme.window_cross(config.zoom_factor())),
        items,
        visuals: &[],
        cursor,
        zoom_progress: 1.0,
        hide_offset: 0.0,
        drop_gap: None,
    }
}

fn bench_compute_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_frame");
    let config = DockConfig::default();
    let theme = ThemeSpec::default().resolve(config.icon_size).unwrap();

    for count in [5, 20, 50] {
        let items = items(count);
        group.throughput(Throughput::Elements(count));

        group.bench_with_input(BenchmarkId::new("rest", count), &items, |b, items| {
            b.iter(|| black_box(compute_frame(&inputs(&config, &theme, items, None))));
        });

        group.bench_with_input(BenchmarkId::new("zoomed", count), &items, |b, items| {
            b.iter(|| black_box(compute_frame(&inputs(&config, &theme, items, Some(black_box(960.0))))));
        });
    }

    group.finish();
}

fn bench_draw_list(c: &mut Criterion) {
    let config = DockConfig::default();
    let theme = ThemeSpec::default().resolve(config.icon_size).unwrap();
    let items = items(20);
    let frame = compute_frame(&inputs(&config, &theme, &items, Some(960.0)));

    c.bench_function("build_draw_list_20", |b| {
        b.iter(|| black_box(build_draw_list(&frame, &theme, |_| Color::GRAY)));
    });
}

fn bench_compose(c: &mut Criterion) {
    let config = DockConfig::default();
    let theme = ThemeSpec::default().resolve(config.icon_size).unwrap();
    let items = items(20);
    let frame = compute_frame(&inputs(&config, &theme, &items, Some(960.0)));
    let mut compositor = Compositor::new();

    c.bench_function("compose_20", |b| {
        b.iter(|| compositor.draw(black_box(&frame), &theme).unwrap());
    });
}

criterion_group!(benches, bench_compute_frame, bench_draw_list, bench_compose);
criterion_main!(benches);
