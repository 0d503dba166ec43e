use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyclip_kernel::{clip_with, ClipSettings, TraceStrategy};
use polyclip_math::Polygon;

fn window() -> Polygon {
    Polygon::from_xy(&[(2.0, -1.0), (5.0, -1.0), (5.0, 3.0), (2.0, 3.0)])
}

/// Regular n-gon centred at (cx, cy).
fn ngon(n: usize, cx: f64, cy: f64, r: f64) -> Polygon {
    Polygon::from_xy(
        &(0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                (cx + r * a.cos(), cy + r * a.sin())
            })
            .collect::<Vec<_>>(),
    )
}

fn benchmark_triangle_vs_quad(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_vs_quad");
    let target = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
    let clip = window();

    for strategy in [TraceStrategy::Eager, TraceStrategy::Lazy] {
        let settings = ClipSettings {
            strategy,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("crossing", format!("{strategy:?}")),
            &settings,
            |b, s| b.iter(|| clip_with(black_box(&target), black_box(&clip), s)),
        );
    }
    group.finish();
}

fn benchmark_ngon_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("ngon_overlap");

    for n in [8, 32, 128] {
        let target = ngon(n, 0.0, 0.0, 1.0);
        let clip = ngon(n, 0.7, 0.3, 1.0);
        for strategy in [TraceStrategy::Eager, TraceStrategy::Lazy] {
            let settings = ClipSettings {
                strategy,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), n),
                &settings,
                |b, s| b.iter(|| clip_with(black_box(&target), black_box(&clip), s)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, benchmark_triangle_vs_quad, benchmark_ngon_overlap);
criterion_main!(benches);
