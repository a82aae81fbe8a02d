use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sbf_decoder::BinaryDecoder;
use sbf_tests::{StreamBuilder, ascii_text};

fn bench_string_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_string");

    // one length per tier, plus both sides of the pooled/large boundary
    for len in [16usize, 200, 1024, 4096, 4097, 65_536, 1 << 20] {
        let bytes = StreamBuilder::new().string(&ascii_text(len)).finish();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| {
                let mut decoder = BinaryDecoder::new(bytes.as_slice());
                black_box(decoder.read_string().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_skip_string(c: &mut Criterion) {
    let bytes = StreamBuilder::new().string(&ascii_text(65_536)).finish();

    c.bench_function("skip_string_64k", |b| {
        b.iter(|| {
            let mut decoder = BinaryDecoder::new(bytes.as_slice());
            decoder.skip_string().unwrap();
        });
    });
}

fn bench_floats(c: &mut Criterion) {
    let mut builder = StreamBuilder::new();
    for i in 0..1024 {
        builder = builder.f32(i as f32 * 0.5).f64(f64::from(i) * 0.25);
    }
    let bytes = builder.finish();

    let mut group = c.benchmark_group("floats");
    group.throughput(Throughput::Elements(2048));
    group.bench_function("f32_f64_pairs", |b| {
        b.iter(|| {
            let mut decoder = BinaryDecoder::new(bytes.as_slice());
            let mut sum = 0.0f64;
            for _ in 0..1024 {
                sum += f64::from(decoder.read_f32().unwrap());
                sum += decoder.read_f64().unwrap();
            }
            black_box(sum)
        });
    });
    group.finish();
}

fn bench_longs(c: &mut Criterion) {
    let mut builder = StreamBuilder::new();
    for i in 0..1024i64 {
        builder = builder.long(i * i * if i % 2 == 0 { 1 } else { -1 });
    }
    let bytes = builder.finish();

    c.bench_function("read_long_1024", |b| {
        b.iter(|| {
            let mut decoder = BinaryDecoder::new(bytes.as_slice());
            let mut acc = 0i64;
            for _ in 0..1024 {
                acc = acc.wrapping_add(decoder.read_long().unwrap());
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_string_tiers,
    bench_skip_string,
    bench_floats,
    bench_longs
);
criterion_main!(benches);
