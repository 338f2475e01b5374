//! Criterion benchmarks for randvar_core.
//!
//! Measures the shared source, the range test on the hot path, and
//! sequential versus parallel sequence production.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rayon::iter::ParallelIterator;
use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random;
use randvar_core::traits::RandomVariable;
use randvar_core::types::RvResult;

/// Uniform draw used to exercise sequence production.
#[derive(Clone)]
struct Unit;

impl RandomVariable for Unit {
    type Value = f64;

    fn next(&mut self) -> RvResult<f64> {
        Ok(static_random::next_double())
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(Unit)
    }
}

/// Benchmark raw draws from the shared source.
fn bench_static_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("static_random");

    group.bench_function("next_double", |b| b.iter(static_random::next_double));
    group.bench_function("next_gaussian", |b| b.iter(static_random::next_gaussian));
    group.bench_function("poisson_ia_time", |b| {
        b.iter(|| static_random::next_poisson_ia_time(black_box(10.0)))
    });
    group.bench_function("poisson_long", |b| {
        b.iter(|| static_random::poisson_long(black_box(25.0)))
    });

    group.finish();
}

/// Benchmark the range test against a two-sided constraint.
fn bench_range_test(c: &mut Criterion) {
    let mut range = RangeConstraint::<f64>::new();
    range.require_minimum(0.0, true).unwrap();
    range.set_maximum(Some(1.0), false).unwrap();

    c.bench_function("range_test_failed", |b| {
        b.iter(|| range.range_test_failed(black_box(0.5)))
    });
}

/// Benchmark sequential and parallel streams.
fn bench_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams");

    for size in [1_000u64, 100_000] {
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| {
                let mut rv = Unit;
                rv.stream(size).filter_map(Result::ok).sum::<f64>()
            });
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, &size| {
            b.iter(|| {
                let mut rv = Unit;
                rv.par_stream(size).filter_map(Result::ok).sum::<f64>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_static_random, bench_range_test, bench_streams);
criterion_main!(benches);
