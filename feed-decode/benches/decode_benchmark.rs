use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use feed_core::DocumentId;
use feed_decode::{Decoder, DecoderConfig};
use feed_gen::Generator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use std::io::Read;
use std::time::{Duration, Instant};

/// Materialize `records` generated put operations as a line-delimited feed.
fn generated_feed(records: u64, payload_size: usize) -> Vec<u8> {
    let base = Instant::now();
    let mut ticks = 0;
    let deadline = base + Duration::from_secs(records) + Duration::from_millis(500);
    let mut generator = Generator::with_rng(payload_size, deadline, StdRng::from_seed([42; 32]))
        .with_clock(move || {
            ticks += 1;
            base + Duration::from_secs(ticks)
        });
    let mut feed = Vec::new();
    generator.read_to_end(&mut feed).unwrap();
    feed
}

/// Wrap a line-delimited feed as a JSON array.
fn as_array(lines: &[u8]) -> Vec<u8> {
    let mut feed = vec![b'['];
    for (i, line) in lines.split(|&b| b == b'\n').filter(|l| !l.is_empty()).enumerate() {
        if i > 0 {
            feed.extend_from_slice(b",\n");
        }
        feed.extend_from_slice(line);
    }
    feed.push(b']');
    feed
}

fn count_documents(feed: &[u8], config: DecoderConfig) -> usize {
    Decoder::with_config(feed, config).map(|doc| doc.unwrap()).count()
}

fn bench_decode_line_delimited(c: &mut Criterion) {
    let feed = generated_feed(1_000, 256);
    let mut group = c.benchmark_group("decode_line_delimited");
    group.throughput(Throughput::Bytes(feed.len() as u64));
    group.bench_function("1000x256B", |b| {
        b.iter(|| {
            black_box(count_documents(
                black_box(&feed),
                DecoderConfig {
                    buffer_capacity: 64 * 1024,
                },
            ))
        })
    });
    group.finish();
}

fn bench_decode_array(c: &mut Criterion) {
    let feed = as_array(&generated_feed(1_000, 256));
    let mut group = c.benchmark_group("decode_array");
    group.throughput(Throughput::Bytes(feed.len() as u64));
    group.bench_function("1000x256B", |b| {
        b.iter(|| {
            black_box(count_documents(
                black_box(&feed),
                DecoderConfig {
                    buffer_capacity: 64 * 1024,
                },
            ))
        })
    });
    group.finish();
}

fn bench_decode_large_fields(c: &mut Criterion) {
    let feed = generated_feed(10, 1 << 20);
    let mut group = c.benchmark_group("decode_large_fields");
    group.throughput(Throughput::Bytes(feed.len() as u64));
    group.sample_size(20);
    group.bench_function("10x1MB", |b| {
        b.iter(|| black_box(count_documents(black_box(&feed), DecoderConfig::default())))
    });
    group.finish();
}

fn bench_small_buffer(c: &mut Criterion) {
    let feed = generated_feed(100, 64);
    c.bench_function("decode_buffer_16B", |b| {
        b.iter(|| black_box(count_documents(black_box(&feed), DecoderConfig::for_testing())))
    });
}

fn bench_id_parse(c: &mut Criterion) {
    c.bench_function("document_id_parse", |b| {
        b.iter(|| black_box(DocumentId::parse(black_box("id:mynamespace:music:g=rock:a-head-full-of-dreams")).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_decode_line_delimited,
    bench_decode_array,
    bench_decode_large_fields,
    bench_small_buffer,
    bench_id_parse,
);
criterion_main!(benches);
