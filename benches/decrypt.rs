// benches/decrypt.rs
//! Candidate scanning and pre-decoding benchmarks

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bullcrypt::{
    decode_content, AlgorithmOptions, Fernet, FernetOptions, Options, Orchestrator,
    PlaintextEncoding,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const KEY: &str = "eBUADWmyqd8diJhRb2Kps6ZMbDqzLOXj2_6ILmFs-sE=";
const WRONG_KEY: &str = "57ndyQKDwbYrkLKXkT0zPBaIpyfSNktkaWk7HOz_WC8=";
const TOKEN: &str = "gAAAAABo7pXag6KIWBdtlWUhl_qnc17dk4bJ4-mI_f4oxpBCLQc7sMacXD5XIP7v2sJctAQJDDJvo7hmCby0zBOG3rIfV2D2ZvirH-kSmX9rrvkk5dB7sUhvJUP6B7qG_xAaWzx823_5";

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Cost of a unit whose only working key is the last one.
fn bench_key_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("key-scan");

    for n_keys in [1, 4, 16, 64] {
        let keys = std::iter::repeat(WRONG_KEY)
            .take(n_keys - 1)
            .chain(std::iter::once(KEY));
        let options = Options::builder()
            .with_algorithm_options(Some(AlgorithmOptions::new(
                FernetOptions::new(keys).unwrap(),
            )))
            .build()
            .unwrap();
        let orchestrator = Orchestrator::new(&Fernet, &options);

        group.throughput(Throughput::Elements(n_keys as u64));
        group.bench_with_input(BenchmarkId::new("keys", n_keys), &n_keys, |b, _| {
            b.iter(|| {
                let outcome = orchestrator.resolve_unit(black_box(TOKEN.as_bytes()));
                assert!(outcome.is_resolved());
                black_box(outcome)
            });
        });
    }

    group.finish();
}

fn bench_pre_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("pre-decode");

    for size in [KB, 64 * KB, MB] {
        let text = STANDARD.encode(vec![0x41u8; size]);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("base64", format_size(size)),
            &text,
            |b, text| {
                b.iter(|| {
                    decode_content(
                        black_box(text),
                        Some(PlaintextEncoding::Base64),
                        encoding_rs::UTF_8,
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_key_scan, bench_pre_decode);
criterion_main!(benches);
