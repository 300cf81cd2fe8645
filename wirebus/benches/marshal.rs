//! Marshal benchmarks - string wire conversion performance.
//!
//! These benchmarks measure the per-argument cost of crossing the string
//! wire in both directions, for numeric scalars and for string payloads at
//! various sizes.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wirebus::{marshal, unmarshal, unwrap_return, wrap_return};

/// Benchmark scalar encode/decode round-trips.
fn bench_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_scalar");

    group.bench_function("marshal_u64", |b| {
        b.iter(|| marshal(black_box(&1_234_567_890_u64)))
    });
    group.bench_function("unmarshal_u64", |b| {
        b.iter(|| unmarshal::<u64>(black_box("1234567890")).unwrap())
    });
    group.bench_function("marshal_f64", |b| {
        b.iter(|| marshal(black_box(&98.6_f64)))
    });
    group.bench_function("unmarshal_f64", |b| {
        b.iter(|| unmarshal::<f64>(black_box("98.6")).unwrap())
    });

    group.finish();
}

/// Benchmark string payloads at various sizes.
fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_string");

    for size in [16, 256, 4_096, 65_536] {
        let payload = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("wrap_return", size),
            &payload,
            |b, payload| b.iter(|| wrap_return(black_box(payload))),
        );
        group.bench_with_input(
            BenchmarkId::new("unwrap_return", size),
            &payload,
            |b, payload| b.iter(|| unwrap_return::<String>(black_box(payload)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scalars, bench_strings);
criterion_main!(benches);
