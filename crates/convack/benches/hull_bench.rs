//! Criterion benchmarks for hull construction.
//! Focus sizes: points in {16, 64, 256, 1024}; merge over {2, 8, 32} polygons.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use convack::api::{draw_polygon_radial, point2, ConvexPolygon, Point2, RadialCfg, ShapeReplay, VertexCount};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| point2(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
        .collect()
}

fn spread_polygons(k: usize, vertices: usize, seed: u64) -> Vec<ConvexPolygon> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(vertices),
        ..RadialCfg::default()
    };
    (0..k as u64)
        .map(|index| {
            let mut p = draw_polygon_radial(cfg, ShapeReplay { seed, index });
            p.translate(25.0 * (index % 8) as f64, 25.0 * (index / 8) as f64);
            p
        })
        .collect()
}

fn bench_gift_wrapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[16usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("gift_wrapping", n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 41),
                |pts| {
                    let _h = ConvexPolygon::convex_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull_of_hulls");
    for &k in &[2usize, 8, 32] {
        let polys = spread_polygons(k, 48, 7);
        let raw: Vec<Point2> = polys.iter().flat_map(|p| p.vertices().iter().copied()).collect();
        group.bench_with_input(BenchmarkId::new("merge", k), &polys, |b, polys| {
            b.iter(|| ConvexPolygon::convex_hull_of(polys))
        });
        group.bench_with_input(BenchmarkId::new("gift_wrapping_union", k), &raw, |b, raw| {
            b.iter(|| ConvexPolygon::convex_hull(raw))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gift_wrapping, bench_merge);
criterion_main!(benches);
