use criterion::{Criterion, criterion_group, criterion_main};
use glimpse_engine::parsing::{scan, select_nearest};
mod common;

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");
    group.sample_size(10);

    let small = common::generate_fragment_document(50);
    group.bench_function("scan_small", |b| {
        b.iter(|| scan(std::hint::black_box(&small)));
    });

    let large = common::generate_large_document();
    group.bench_function("scan_large", |b| {
        b.iter(|| scan(std::hint::black_box(&large)));
    });

    group.finish();
}

fn bench_select_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    let large = common::generate_large_document();
    let spans = scan(&large);
    let cursor = large.len() / 2;
    group.bench_function("select_nearest_large", |b| {
        b.iter(|| select_nearest(std::hint::black_box(&spans), std::hint::black_box(cursor)));
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_select_nearest);
criterion_main!(benches);
