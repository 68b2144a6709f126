//! Criterion microbenches for annotation validation and statistics.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use tcas_index::index::{DatasetIndex, SplitName};
use tcas_index::model::raw::from_json_str;
use tcas_index::model::{Category, CrashType, FrameRecord, VideoRecord};
use tcas_index::stats::compute_statistics;
use tcas_index::validation::validate_annotation;

// Include the worked annotation example at compile time (no file I/O
// during benchmark)
const CRASH_FIXTURE: &str = include_str!("../tests/fixtures/crash_001.json");

/// Benchmark raw annotation parsing from string.
fn bench_annotation_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotation");
    group.throughput(Throughput::Bytes(CRASH_FIXTURE.len() as u64));

    group.bench_function("parse_raw", |b| {
        b.iter(|| {
            let raw = from_json_str(black_box(CRASH_FIXTURE)).unwrap();
            black_box(raw)
        })
    });

    group.finish();
}

/// Benchmark schema validation of an already-parsed annotation.
fn bench_annotation_validate(c: &mut Criterion) {
    let raw = from_json_str(CRASH_FIXTURE).unwrap();

    let mut group = c.benchmark_group("annotation");
    group.bench_function("validate", |b| {
        b.iter(|| {
            let record = validate_annotation(black_box(&raw)).unwrap();
            black_box(record)
        })
    });

    group.finish();
}

/// Benchmark statistics recomputation over a synthetic 1k-video catalog.
fn bench_compute_statistics(c: &mut Criterion) {
    let records: Vec<VideoRecord> = (0..1000u64)
        .map(|i| {
            let record = if i % 3 == 0 {
                VideoRecord::new(format!("crash_{:03}", i), 30, 60.0, Category::Crash)
                    .with_crash(100 + i, CrashType::RearEnd)
            } else {
                VideoRecord::new(format!("normal_{:03}", i), 30, 60.0, Category::Normal)
            };
            record.with_frames(vec![
                FrameRecord::new(10, 0.33),
                FrameRecord::new(20, 0.67),
            ])
        })
        .collect();
    let index = DatasetIndex::from_records(SplitName::Train, records);

    let mut group = c.benchmark_group("stats");
    group.bench_function("compute_statistics_1k", |b| {
        b.iter(|| {
            let stats = compute_statistics(black_box(&index));
            black_box(stats)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_annotation_parse,
    bench_annotation_validate,
    bench_compute_statistics
);
criterion_main!(benches);
