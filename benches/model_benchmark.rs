//! Every model-layer operation under every consistency model.
//!
//! The `unsynchronized` rows are the check that the plain path issues no
//! atomic read-modify-write: they should track a plain `u64` loop, well below
//! the `relaxed_consistency` rows for the fetch operations.

use core::sync::atomic::AtomicU64;

use atomic_ops::model;
use atomic_ops::{MemoryModel, Unsynchronized, RC, SC, XC};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const OPS: u64 = 1024;

fn bench_model<M: MemoryModel>(c: &mut Criterion, m: M) {
    let name = M::MODEL.to_string();
    let mut group = c.benchmark_group(name.as_str());
    group.throughput(Throughput::Elements(OPS));

    let a = AtomicU64::new(0);

    group.bench_function("load", |b| {
        b.iter(|| (0..OPS).fold(0, |acc, _| acc ^ model::load(black_box(&a), m)));
    });
    group.bench_function("store", |b| {
        b.iter(|| {
            for i in 0..OPS {
                model::store(black_box(&a), i, m);
            }
        });
    });
    group.bench_function("fetch_add", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(model::fetch_add(black_box(&a), i, m));
            }
        });
    });
    group.bench_function("fetch_and", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(model::fetch_and(black_box(&a), !i, m));
            }
        });
    });
    group.bench_function("fetch_or", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(model::fetch_or(black_box(&a), i, m));
            }
        });
    });

    group.finish();
}

fn model_benchmark(c: &mut Criterion) {
    bench_model(c, SC);
    bench_model(c, RC);
    bench_model(c, XC);
    // SAFETY: the benchmarked location is local to this thread.
    bench_model(c, unsafe { Unsynchronized::new() });
}

criterion_group!(benches, model_benchmark);
criterion_main!(benches);
