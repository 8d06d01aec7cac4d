//! Gram matrix update benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (square blocks from 64 to 1024 vectors)
//! - Vector dimension (1 to 256)
//! - Kernel family (ARD vs Matérn-5/2)
//! - Incremental growth (one new row appended to an existing dataset)
//!
//! For serial execution, use `GRAMKERNEL_MODE=serial cargo bench`.
//! For parallel execution, use `GRAMKERNEL_MODE=parallel cargo bench`.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gramkernel::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("GRAMKERNEL_MODE").ok().as_deref() {
        Some("serial") => (false, "serial"),
        Some("parallel") | _ => (true, "parallel"),
    }
}

fn updater(kind: KernelKind, parallel: bool) -> GramUpdater<f64> {
    Gram::new()
        .kernel(kind)
        .noise(1e-6)
        .parallel(parallel)
        .build()
        .unwrap()
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate `count` standard-normal vectors of dimension `dim`.
fn generate_normal_vectors(count: usize, dim: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();
    (0..count * dim).map(|_| dist.sample(&mut rng)).collect()
}

/// Generate `count` vectors uniform in the unit hypercube.
fn generate_unit_cube_vectors(count: usize, dim: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0.0, 1.0).unwrap();
    (0..count * dim).map(|_| dist.sample(&mut rng)).collect()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(30);

    let dim = 8;
    let gram = updater(KernelKind::Ard, use_parallel);

    for count in [64, 256, 1024] {
        group.throughput(Throughput::Elements((count * count) as u64));

        let x = generate_normal_vectors(count, dim, 42);
        let mut out = vec![0.0; count * count];
        let region = VectorRegion::whole(x.len());

        group.bench_with_input(BenchmarkId::new("self_gram", count), &count, |b, _| {
            b.iter(|| {
                gram.update(
                    black_box(&x),
                    region,
                    black_box(&x),
                    region,
                    &mut out,
                    VectorRegion::whole(count * count),
                    dim,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_dimension(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("dimension_{}", mode_name));
    group.sample_size(30);

    let count = 256;
    let gram = updater(KernelKind::Ard, use_parallel);

    for dim in [1, 16, 64, 256] {
        group.throughput(Throughput::Elements((count * count * dim) as u64));

        let x = generate_unit_cube_vectors(count, dim, 7);
        let mut out = vec![0.0; count * count];
        let region = VectorRegion::whole(x.len());

        group.bench_with_input(BenchmarkId::new("self_gram", dim), &dim, |b, &dim| {
            b.iter(|| {
                gram.update(
                    black_box(&x),
                    region,
                    black_box(&x),
                    region,
                    &mut out,
                    VectorRegion::whole(count * count),
                    dim,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_kernels(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("kernels_{}", mode_name));
    group.sample_size(30);

    let (count, dim) = (512, 16);
    let x = generate_normal_vectors(count, dim, 3);
    let region = VectorRegion::whole(x.len());
    group.throughput(Throughput::Elements((count * count) as u64));

    for kind in KernelKind::ALL {
        let gram = updater(kind, use_parallel);
        let mut out = vec![0.0; count * count];

        group.bench_function(BenchmarkId::new("self_gram", kind), |b| {
            b.iter(|| {
                gram.update(
                    black_box(&x),
                    region,
                    black_box(&x),
                    region,
                    &mut out,
                    VectorRegion::whole(count * count),
                    dim,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_incremental(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("incremental_{}", mode_name));
    group.sample_size(50);

    let dim = 4;
    let gram = updater(KernelKind::Matern52, use_parallel);

    for count in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(count as u64));

        let x = generate_normal_vectors(count + 1, dim, 11);
        let mut row = vec![0.0; count];
        let history = VectorRegion::new(0, count * dim);
        let newest = VectorRegion::new(count * dim, dim);

        group.bench_with_input(BenchmarkId::new("append_row", count), &count, |b, _| {
            b.iter(|| {
                gram.update(
                    black_box(&x),
                    history,
                    black_box(&x),
                    newest,
                    &mut row,
                    VectorRegion::whole(count),
                    dim,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_dimension,
    bench_kernels,
    bench_incremental,
);

criterion_main!(benches);
