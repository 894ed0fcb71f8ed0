//! # MG-01 Model Verification Benchmarks
//!
//! Targets on a Cortex-A53 class device:
//! - Single verification of a 4 MiB model: dominated by SHA-256 throughput
//! - Key parse: < 200μs
//! - Batch verification scales with cores
//!
//! Conditions:
//! - Payload sizes from 1 KiB to 16 MiB
//! - Rejections at each stage (early exits should be cheap)
//! - Mixed valid/invalid batches

use crate::fixtures::{default_gate, model_bytes, P256Signer};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use mg_01_model_verification::{
    EcdsaSignaturePrimitive, ModelPackage, ModelVerificationApi, SignaturePrimitive, TrustedKey,
};
use std::time::Duration;

pub fn bench_verify_by_payload_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("mg-01/verify/payload_size");
    group.measurement_time(Duration::from_secs(10));

    let gate = default_gate();
    let signer = P256Signer::random();

    for size in [1024usize, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let package = signer.package(&model_bytes(size), "bench", "1");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &package, |b, package| {
            b.iter(|| black_box(gate.verify(package, &signer.trusted_key)))
        });
    }

    group.finish();
}

pub fn bench_rejection_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("mg-01/verify/rejections");

    let gate = default_gate();
    let signer = P256Signer::random();
    let payload = model_bytes(64 * 1024);
    let package = signer.package(&payload, "bench", "1");
    let garbage_key = TrustedKey::from("-----BEGIN PUBLIC KEY-----\ngarbage\n-----END PUBLIC KEY-----\n");

    group.bench_function("key_parse_error", |b| {
        b.iter(|| black_box(gate.verify(&package, &garbage_key)))
    });

    let mut signature = signer.sign_der(&payload);
    signature[10] ^= 0x01;
    let tampered = ModelPackage::new(payload.clone(), signature).unwrap();
    group.bench_function("signature_invalid", |b| {
        b.iter(|| black_box(gate.verify(&tampered, &signer.trusted_key)))
    });

    group.finish();
}

pub fn bench_key_parse(c: &mut Criterion) {
    let signer = P256Signer::random();
    let primitive = EcdsaSignaturePrimitive::p256();

    c.bench_function("mg-01/key_parse/p256_pem", |b| {
        b.iter(|| black_box(primitive.parse_key(&signer.trusted_key).is_ok()))
    });
}

pub fn bench_batch_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("mg-01/verify/batch");
    group.measurement_time(Duration::from_secs(10));

    let gate = default_gate();
    let signer = P256Signer::random();
    let intruder = P256Signer::random();

    for count in [4usize, 16, 64] {
        let packages: Vec<ModelPackage> = (0..count)
            .map(|i| {
                let payload = model_bytes(16 * 1024 + i);
                if i % 8 == 7 {
                    intruder.package(&payload, "bench", "1")
                } else {
                    signer.package(&payload, "bench", "1")
                }
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("parallel", count), &packages, |b, packages| {
            b.iter(|| black_box(gate.verify_batch(packages, &signer.trusted_key)))
        });
        group.bench_with_input(BenchmarkId::new("sequential", count), &packages, |b, packages| {
            b.iter(|| {
                packages
                    .iter()
                    .map(|p| gate.verify(p, &signer.trusted_key))
                    .filter(|o| o.is_admitted())
                    .count()
            })
        });
    }

    group.finish();
}
