//! Benchmarks for the standard library's [`BTreeMap`], for comparison with
//! [`SkipList`](skipindex::SkipList) and [`SkipMap`](skipindex::SkipMap).

use std::collections::BTreeMap;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes.
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Benchmarking insertion.
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map: BTreeMap<u64, ()> =
                std::iter::repeat_with(|| (rng.random(), ())).take(size).collect();

            b.iter(|| {
                black_box(map.insert(rng.random(), ()));
            });
        });
    }
}

/// Benchmarking lookup of keys known to be present.
pub fn get(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Get");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let map: BTreeMap<u64, ()> =
                std::iter::repeat_with(|| (rng.random(), ())).take(size).collect();
            let present: Vec<u64> = map.keys().copied().collect();
            let probes: Vec<u64> =
                std::iter::repeat_with(|| present[rng.random_range(0..present.len())])
                    .take(10)
                    .collect();

            b.iter(|| {
                for probe in &probes {
                    black_box(map.get(probe));
                }
            });
        });
    }
}

/// Run all baseline benchmarks.
pub fn benchmark(c: &mut Criterion) {
    insert(c);
    get(c);
}
