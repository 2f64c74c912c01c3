use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pprof::criterion::{Output, PProfProfiler};
use std::time::Duration;

use eogcal_core::{Marker, MarkerStyle, TargetLayout};
use eogcal_render::MarkerRenderer;

/// Full frame cost (clear + marker blit) at common display sizes.
pub fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group
        .sample_size(50)
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(2));

    for (w, h) in [(1280u32, 720u32), (1920, 1080), (3840, 2160)] {
        let style = MarkerStyle::default();
        let layout = TargetLayout::compute(w as f32, h as f32);
        let mut renderer = MarkerRenderer::new(w, h, style.clone()).expect("renderer");
        let mut frame = vec![0u8; (w * h * 4) as usize];

        renderer.set_visible(true);
        group.bench_with_input(
            BenchmarkId::new("corner_target", format!("{w}x{h}")),
            &(w, h),
            |b, _| {
                renderer.set_position(layout.placement(5, style.radius).unwrap_or_default());
                let mut t = Duration::ZERO;
                b.iter(|| {
                    t += Duration::from_millis(16);
                    black_box(renderer.render_frame(black_box(&mut frame), t).expect("frame"));
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
        .confidence_level(0.95)
        .noise_threshold(0.02)
        .significance_level(0.05);
    targets = bench_render_frame
}

criterion_main!(benches);
