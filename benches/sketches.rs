//! Benchmarks for sketch construction and comparison.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use simsketch::{
    BottomKConfig, BottomKSketch, FeatureHashing, FeatureHashingConfig, HashKind,
    OnePermutationConfig, OnePermutationSketch, SystemRandom,
};

// === Generators ===

fn random_set(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set: Vec<u32> = (0..n).map(|_| rng.gen()).collect();
    set.sort_unstable();
    set.dedup();
    set
}

fn random_vector(n: usize, seed: u64) -> Vec<(u32, f64)> {
    random_set(n, seed)
        .into_iter()
        .map(|id| (id, 1.0 / (n as f64).sqrt()))
        .collect()
}

// === Benchmarks ===

fn bench_one_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_permutation");
    let mut rng = SystemRandom::seeded(42);

    for n in [50usize, 200, 2000, 20_000] {
        group.throughput(Throughput::Elements(n as u64));
        let set = random_set(n, n as u64);
        for hash in [HashKind::MultiplyShift, HashKind::MixedTab] {
            let config = OnePermutationConfig { k: 200, hash };
            let Ok(sketcher) = OnePermutationSketch::new(&config, &mut rng) else {
                continue;
            };
            group.bench_with_input(
                BenchmarkId::new(hash.to_string(), n),
                &set,
                |bench, set| bench.iter(|| sketcher.sketch(black_box(set))),
            );
        }
    }

    group.finish();
}

fn bench_bottom_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("bottom_k");
    let mut rng = SystemRandom::seeded(43);
    let Ok(sketcher) = BottomKSketch::new(&BottomKConfig::default(), &mut rng) else {
        return;
    };

    for n in [200usize, 2000, 20_000] {
        group.throughput(Throughput::Elements(n as u64));
        let set = random_set(n, n as u64);
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |bench, set| {
            bench.iter(|| sketcher.sketch(black_box(set)));
        });
    }

    group.finish();
}

fn bench_feature_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_hashing");
    let mut rng = SystemRandom::seeded(44);
    let Ok(fh) = FeatureHashing::new(&FeatureHashingConfig::default(), &mut rng) else {
        return;
    };

    for n in [100usize, 1000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let v = random_vector(n, n as u64);
        group.bench_with_input(BenchmarkId::from_parameter(n), &v, |bench, v| {
            bench.iter(|| fh.sketch(black_box(v)));
        });
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let mut rng = SystemRandom::seeded(45);
    let a = random_set(2000, 1);
    let b = random_set(2000, 2);

    if let Ok(oph) = OnePermutationSketch::new(&OnePermutationConfig::default(), &mut rng) {
        let (x, y) = (oph.sketch(&a), oph.sketch(&b));
        group.bench_function("one_permutation", |bench| {
            bench.iter(|| oph.estimate(black_box(&x), black_box(&y)));
        });
    }
    if let Ok(bk) = BottomKSketch::new(&BottomKConfig::default(), &mut rng) {
        let (x, y) = (bk.sketch(&a), bk.sketch(&b));
        group.bench_function("bottom_k", |bench| {
            bench.iter(|| bk.estimate(black_box(&x), black_box(&y)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_one_permutation,
    bench_bottom_k,
    bench_feature_hashing,
    bench_estimate
);
criterion_main!(benches);
