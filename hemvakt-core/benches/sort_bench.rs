#[macro_use]
extern crate criterion;

use criterion::{BatchSize, BenchmarkId, Criterion};
use rand::Rng;

use hemvakt_core::quick_sort_by_key;

fn bench_quick_sort_by_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("quick_sort_priority");

    for size in [64usize, 512, 4096] {
        group.throughput(criterion::Throughput::Elements(size as u64));

        let mut rng = rand::rng();
        let random: Vec<(u8, u32)> = (0..size)
            .map(|i| (rng.random_range(1..=5), i as u32))
            .collect();
        let presorted: Vec<(u8, u32)> = (0..size)
            .map(|i| ((i % 5 + 1) as u8, i as u32))
            .collect();

        group.bench_with_input(BenchmarkId::new("random", size), &random, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut alerts| quick_sort_by_key(&mut alerts, |alert| alert.0),
                BatchSize::SmallInput,
            );
        });

        // Last-element pivot makes sorted input the worst case.
        group.bench_with_input(BenchmarkId::new("presorted", size), &presorted, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut alerts| quick_sort_by_key(&mut alerts, |alert| alert.1),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quick_sort_by_priority);
criterion_main!(benches);
