//! Benchmarks for oriel-math reductions.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::Array1;
use oriel_math::{nan_mean, nan_std};
use rand::Rng;

fn random_array(n: usize, nan_share: f64) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| {
        if rng.r#gen::<f64>() < nan_share { f64::NAN } else { rng.r#gen::<f64>() * 100.0 }
    }))
}

fn bench_nan_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("nan_mean");

    for size in [100, 1000, 10000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_array(size, 0.1);
            b.iter(|| nan_mean(black_box(data.view())));
        });
    }

    group.finish();
}

fn bench_nan_std(c: &mut Criterion) {
    let mut group = c.benchmark_group("nan_std");

    for size in [100, 1000, 10000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_array(size, 0.1);
            b.iter(|| nan_std(black_box(data.view())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nan_mean, bench_nan_std);
criterion_main!(benches);
