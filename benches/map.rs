//! Benchmarks for the string-keyed [`SkipMap`].

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;
use skipindex::SkipMap;

/// Benchmarking sizes.
const SIZES: [usize; 5] = [1, 10, 100, 1000, 10_000];

fn key(rng: &mut StdRng) -> String {
    format!("key-{:016x}", rng.random::<u64>())
}

/// Benchmarking upserts of random keys.
pub fn upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Upsert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut map: SkipMap<u64> =
                std::iter::repeat_with(|| (key(&mut rng), rng.random())).take(size).collect();
            let keys: Vec<String> = std::iter::repeat_with(|| key(&mut rng)).take(64).collect();

            b.iter(|| {
                let k = &keys[rng.random_range(0..keys.len())];
                drop(black_box(map.upsert(k.as_str(), rng.random())));
            });
        });
    }
}

/// Benchmarking lookup of keys known to be present.
pub fn get(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Get");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let map: SkipMap<u64> =
                std::iter::repeat_with(|| (key(&mut rng), rng.random())).take(size).collect();
            let present: Vec<&str> = map.keys().collect();
            let probes: Vec<&str> =
                std::iter::repeat_with(|| present[rng.random_range(0..present.len())])
                    .take(10)
                    .collect();

            b.iter(|| {
                for probe in &probes {
                    black_box(map.get(probe).ok());
                }
            });
        });
    }
}

/// Run all benchmarks for the map.
pub fn benchmark(c: &mut Criterion) {
    upsert(c);
    get(c);
}
