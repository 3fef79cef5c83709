//! Benchmarks for hull construction on measurement-grid sized inputs
//!
//! - Fibonacci lattices of 180, 840 and 5100 points (typical t-design sizes)
//! - Jittered random spheres, where most points end up on the hull
//! - A cube filled with interior points, where most points are discarded

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hrtf_hull::testdata::{cube_with_interior_points, fibonacci_sphere_points, random_sphere_points};
use hrtf_hull::{HullConfig, build_hull};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn benchmark_fibonacci_spheres(c: &mut Criterion) {
    let config = HullConfig::default();
    let mut group = c.benchmark_group("fibonacci_sphere");

    for n in [180, 840, 5100] {
        let points = fibonacci_sphere_points(n, 1.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| build_hull(black_box(points), &config).expect("hull construction failed"));
        });
    }

    group.finish();
}

fn benchmark_random_spheres(c: &mut Criterion) {
    let config = HullConfig::default();
    let mut group = c.benchmark_group("random_sphere");

    for n in [500, 2000] {
        let mut rng = StdRng::seed_from_u64(42);
        let points = random_sphere_points(n, 1.0, 0.01, &mut rng);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| build_hull(black_box(points), &config).expect("hull construction failed"));
        });
    }

    group.finish();
}

fn benchmark_interior_points(c: &mut Criterion) {
    let config = HullConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let points = cube_with_interior_points(2.0, 5000, &mut rng);

    c.bench_function("cube_with_5000_interior_points", |b| {
        b.iter(|| build_hull(black_box(&points), &config).expect("hull construction failed"));
    });
}

criterion_group!(
    benches,
    benchmark_fibonacci_spheres,
    benchmark_random_spheres,
    benchmark_interior_points
);
criterion_main!(benches);
