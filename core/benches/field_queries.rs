//! Cost of the per-cell oracle and of bounded flood reveals.
//!
//! Run with: cargo bench --package infisweep-core --bench field_queries

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use infisweep_core::{DEFAULT_MAX_REVEAL, MineField, Viewport};

const SEED: &str = "bench-seed";

fn benchmark_contains_mine(c: &mut Criterion) {
    let field = MineField::new(SEED, 0.15).unwrap();

    c.bench_function("contains_mine", |b| {
        let mut x = 0i64;
        b.iter(|| {
            x += 1;
            black_box(field.contains_mine(black_box((x, x / 3))))
        });
    });
}

fn benchmark_adjacent_count(c: &mut Criterion) {
    let field = MineField::new(SEED, 0.15).unwrap();

    c.bench_function("adjacent_mine_count", |b| {
        let mut x = 0i64;
        b.iter(|| {
            x += 1;
            black_box(field.adjacent_mine_count(black_box((x, -x))))
        });
    });
}

fn benchmark_viewport_scan(c: &mut Criterion) {
    let field = MineField::new(SEED, 0.15).unwrap();
    let Ok(viewport) = Viewport::centered_on((0, 0), 100, 100) else {
        return;
    };

    let mut group = c.benchmark_group("viewport_scan");
    group.throughput(Throughput::Elements(viewport.area()));

    group.bench_function("mines_in_100x100", |b| {
        b.iter(|| black_box(field.mines_in(black_box(&viewport))));
    });

    group.finish();
}

fn benchmark_flood_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_reveal");
    group.sample_size(20);

    // nearly empty field, the budget is what stops the traversal
    let sparse = MineField::new(SEED, 0.01).unwrap();
    group.throughput(Throughput::Elements(DEFAULT_MAX_REVEAL as u64));
    group.bench_function("sparse_full_budget", |b| {
        b.iter(|| black_box(sparse.flood_reveal(black_box((0, 0)), DEFAULT_MAX_REVEAL)));
    });

    let dense = MineField::new(SEED, 0.15).unwrap();
    group.bench_function("dense_region", |b| {
        b.iter(|| black_box(dense.flood_reveal(black_box((4, 4)), DEFAULT_MAX_REVEAL)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_contains_mine,
    benchmark_adjacent_count,
    benchmark_viewport_scan,
    benchmark_flood_reveal
);
criterion_main!(benches);
