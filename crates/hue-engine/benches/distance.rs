//! Engine hot-path benchmarks.
//!
//! Run with: `cargo bench -p hue-engine`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hue_engine::{AnalyzeOptions, DeltaE, Engine, EngineConfig};

fn sample_rgbs(n: usize) -> Vec<hue_core::Rgb> {
    let mut state = 0x9E3779B97F4A7C15u64;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            hue_core::Rgb::new((state >> 8) as u8, (state >> 24) as u8, (state >> 40) as u8)
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut group = c.benchmark_group("distance");

    for size in [1_000usize, 100_000] {
        let labs = engine.labs(&sample_rgbs(size * 2));
        let pairs: Vec<_> = labs.chunks_exact(2).map(|c| (c[0], c[1])).collect();
        group.throughput(Throughput::Elements(size as u64));

        for algorithm in [DeltaE::Cie76, DeltaE::Cie94, DeltaE::Ciede2000] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.id(), size),
                &pairs,
                |b, pairs| b.iter(|| engine.distances(black_box(pairs), algorithm)),
            );
        }
    }
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut group = c.benchmark_group("rgb_to_lab");

    for size in [1_000usize, 100_000] {
        let rgbs = sample_rgbs(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rgbs, |b, rgbs| {
            b.iter(|| engine.labs(black_box(rgbs)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut group = c.benchmark_group("analyze");

    let uncached = AnalyzeOptions {
        use_cache: false,
        ..AnalyzeOptions::default()
    };
    group.bench_function("uncached", |b| {
        b.iter(|| engine.analyze_color(black_box("#4682B4"), &uncached).unwrap())
    });

    let cached = AnalyzeOptions::default();
    engine.analyze_color("#4682B4", &cached).unwrap();
    group.bench_function("cached", |b| {
        b.iter(|| engine.analyze_color(black_box("#4682B4"), &cached).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_distance, bench_conversion, bench_analyze);
criterion_main!(benches);
