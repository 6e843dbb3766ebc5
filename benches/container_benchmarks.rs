//! Benchmarks for the three containers.
//!
//! Covers the operations with algorithmic content: ordered insert/remove and
//! rank queries on the sorted map, and churn (insert + get) on the cache.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use entrymap::prelude::*;

fn bench_sorted_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_map");

    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("insert", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = SortedMap::new();
                for i in 0..size {
                    // Pseudo-shuffled order to avoid purely ascending inserts.
                    map.insert(black_box((i * 7919) % size), i);
                }
                map
            });
        });

        let map = SortedMap::from_pairs((0..size).map(|i| (i, i)));
        group.bench_with_input(BenchmarkId::new("bisect_left", size), &size, |b, &size| {
            b.iter(|| {
                let mut total = 0;
                for i in 0..size {
                    total += map.bisect_left(black_box(&i));
                }
                total
            });
        });

        group.bench_with_input(BenchmarkId::new("peekitem", size), &size, |b, &size| {
            b.iter(|| {
                let mut total = 0;
                for i in 0..size {
                    if let Ok((key, _)) = map.peekitem(black_box(i as isize)) {
                        total += key;
                    }
                }
                total
            });
        });
    }

    group.finish();
}

fn bench_unordered_map(c: &mut Criterion) {
    c.bench_function("unordered_map/insert_10k", |b| {
        b.iter(|| {
            let mut map = UnorderedMap::new();
            for i in 0..10_000u64 {
                map.insert(black_box(i), i);
            }
            map
        });
    });
}

fn bench_lru_cache(c: &mut Criterion) {
    c.bench_function("lru_cache/churn_10k", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(256).unwrap();
            for i in 0..10_000u64 {
                cache.insert(black_box(i % 512), i);
                if i % 3 == 0 {
                    let _ = cache.get(black_box(&(i % 512)));
                }
            }
            cache
        });
    });
}

criterion_group!(
    benches,
    bench_sorted_map,
    bench_unordered_map,
    bench_lru_cache
);
criterion_main!(benches);
