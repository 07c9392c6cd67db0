//! Benchmark for lattice noise sampling.
//!
//! Run with: cargo bench --package delve_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use delve_procedural::noise::{LatticeNoise, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = LatticeNoise::new(WorldSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = LatticeNoise::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = f64::from(i % 1000) * 0.15;
                let z = f64::from(i / 1000) * 0.15;
                black_box(noise.sample(x, z));
            }
        });
    });

    group.finish();
}

fn benchmark_lattice_hash(c: &mut Criterion) {
    let noise = LatticeNoise::new(WorldSeed::new(42));

    c.bench_function("lattice_hash", |b| {
        let mut i = 0i64;
        b.iter(|| {
            i += 1;
            black_box(noise.hash(black_box(i), black_box(-i)))
        });
    });
}

criterion_group!(benches, benchmark_single_sample, benchmark_million_samples, benchmark_lattice_hash);
criterion_main!(benches);
