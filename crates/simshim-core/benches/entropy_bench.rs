//! Hot-path benchmarks for the deterministic entropy source and the lock
//! bank.
//!
//! The rand family is the most frequently intercepted surface during a
//! simulation run, and lock acquire/release is the second; both should stay
//! within a few nanoseconds per operation.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use simshim_core::entropy::EntropySource;
use simshim_core::lockbank::{LockBank, LockMode};

fn bench_entropy_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("entropy_fill");
    for size in [16usize, 64, 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut source = EntropySource::new(1);
            let mut buf = vec![0u8; size];
            b.iter(|| {
                source.fill(black_box(&mut buf));
            });
        });
    }
    group.finish();
}

fn bench_lock_round_trip(c: &mut Criterion) {
    let bank = LockBank::new(32);
    c.bench_function("lock_read_round_trip", |b| {
        b.iter(|| {
            bank.acquire(black_box(7), LockMode::Read);
            bank.release(black_box(7), LockMode::Read);
        });
    });
    c.bench_function("lock_write_round_trip", |b| {
        b.iter(|| {
            bank.acquire(black_box(7), LockMode::Write);
            bank.release(black_box(7), LockMode::Write);
        });
    });
}

criterion_group!(benches, bench_entropy_fill, bench_lock_round_trip);
criterion_main!(benches);
