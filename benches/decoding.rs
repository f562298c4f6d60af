use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use microparse::{CivilDateTime, DecimalValue, EpochTimestamp, HexValue, Uuid, base64url};

fn bench_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal");
    for text in ["7", "65535", "18446744073709551615"] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), text, |b, text| {
            b.iter(|| DecimalValue::parse(black_box(text.as_bytes())).unwrap());
        });
    }
    group.finish();

    let mut group = c.benchmark_group("hexadecimal");
    for text in ["7c0", "0xffffffffffffffff"] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), text, |b, text| {
            b.iter(|| HexValue::parse(black_box(text.as_bytes())).unwrap());
        });
    }
    group.finish();
}

fn bench_date_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_time");
    for (name, text) in [
        ("naive", "1984-10-24 23:59:59"),
        ("zulu_nanos", "1984-10-24T23:59:59.123456789Z"),
        ("offset", "1984-10-24 23:59:59.123456-11:30"),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| CivilDateTime::parse(black_box(text.as_bytes())).unwrap());
        });
    }
    group.bench_function("timestamp", |b| {
        let text = b"1984-10-24 23:59:59.123456Z";
        b.iter(|| EpochTimestamp::parse(black_box(text)).unwrap());
    });
    group.finish();
}

fn bench_uuids(c: &mut Criterion) {
    let mut group = c.benchmark_group("uuid");
    for (name, text) in [
        ("compact", "f81d4fae7dec11d0a76500a0c91e6bf6"),
        ("dashed", "f81d4fae-7dec-11d0-a765-00a0c91e6bf6"),
        ("braced", "{f81d4fae-7dec-11d0-a765-00a0c91e6bf6}"),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| Uuid::parse(black_box(text.as_bytes())).unwrap());
        });
    }
    group.finish();
}

fn bench_base64url(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64url_decode");
    for size in [24usize, 96, 384, 1536, 6144] {
        let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let encoded = base64url::encode(&data);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &encoded,
            |b, encoded| {
                b.iter(|| base64url::decode(black_box(encoded.as_bytes())).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_integers,
    bench_date_times,
    bench_uuids,
    bench_base64url
);
criterion_main!(benches);
