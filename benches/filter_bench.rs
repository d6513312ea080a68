//! SHAREBLOOM - Performance Benchmarks
//! Measures the filter protocol and hashing using Criterion,
//! against the in-memory store so no server is needed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sharebloom::filter::hashing::bit_positions;
use sharebloom::filter::SharedBloomFilter;
use sharebloom::store::MemoryBitStore;

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");

    for k in [4u32, 7, 16].iter() {
        group.bench_with_input(BenchmarkId::new("positions", k), k, |b, &k| {
            b.iter(|| {
                for pos in bit_positions(black_box(b"key_000500"), k, 9586) {
                    black_box(pos);
                }
            });
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_filter");

    group.bench_function("open_fresh_10000", |b| {
        b.iter(|| {
            let bf = SharedBloomFilter::open(MemoryBitStore::new(), "bench", 10_000, 0.01).unwrap();
            black_box(bf.num_bits());
        });
    });

    group.bench_function("add_1000", |b| {
        b.iter(|| {
            let bf = SharedBloomFilter::open(MemoryBitStore::new(), "bench", 1000, 0.01).unwrap();
            for i in 0..1000 {
                let key = format!("key_{:06}", i);
                bf.add(black_box(key.as_bytes())).unwrap();
            }
        });
    });

    let bf = SharedBloomFilter::open(MemoryBitStore::new(), "bench", 1000, 0.01).unwrap();
    for i in 0..1000 {
        bf.add(format!("key_{:06}", i).as_bytes()).unwrap();
    }

    group.bench_function("contains_hit", |b| {
        b.iter(|| black_box(bf.contains(b"key_000500").unwrap()));
    });

    group.bench_function("contains_miss", |b| {
        b.iter(|| black_box(bf.contains(b"definitely_not_here").unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_hashing, bench_filter);
criterion_main!(benches);
