//! # Integration Test Flows
//!
//! Tests that the verification gate, the load service, the filesystem
//! activator and the runtime work together.
//!
//! ## Flows Tested:
//!
//! 1. **Gate → Service → Activator**: only admitted models are installed
//! 2. **Runtime**: package files on disk, manifest pins and metrics
//! 3. **Batch**: independent packages verified in parallel

#[cfg(test)]
mod tests {
    use crate::fixtures::{default_gate, model_bytes, P256Signer};
    use gate_runtime::{
        ActivationPolicy, FileSystemActivator, GateRuntime, RunOutcome, RuntimeConfig,
    };
    use mg_01_model_verification::{
        LoadError, ModelLoadService, ModelPackage, ModelVerificationApi,
        RejectionReason, VerificationOutcome,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Write a signed package to `dir` and return runtime args for it.
    fn write_package(dir: &Path, signer: &P256Signer, payload: &[u8]) -> Vec<String> {
        let model = dir.join("detector.tflite");
        let signature = dir.join("detector.sig");
        let key = dir.join("model_signing_key.pem");
        fs::write(&model, payload).unwrap();
        fs::write(&signature, signer.sign_der(payload)).unwrap();
        fs::write(&key, &signer.pem).unwrap();

        vec![
            model.display().to_string(),
            signature.display().to_string(),
            String::new(),
            key.display().to_string(),
        ]
    }

    fn env(active_dir: &Path) -> impl Fn(&str) -> Option<String> {
        let mut vars = HashMap::new();
        vars.insert("MG_ACTIVE_DIR".to_string(), active_dir.display().to_string());
        move |name: &str| vars.get(name).cloned()
    }

    // =============================================================================
    // GATE → SERVICE → ACTIVATOR
    // =============================================================================

    #[test]
    fn test_service_installs_admitted_model() {
        let dir = tempfile::tempdir().unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(4096);

        let service = ModelLoadService::new(
            default_gate(),
            FileSystemActivator::new(dir.path(), ActivationPolicy::default()),
        );

        let path = service
            .load(
                signer.package(&payload, "object_detector_v2", "2.1.0"),
                &signer.trusted_key,
            )
            .unwrap();

        assert_eq!(path, dir.path().join("object_detector_v2-2.1.0.model"));
        assert_eq!(fs::read(path).unwrap(), payload);
    }

    #[test]
    fn test_service_refuses_every_rejection_without_installing() {
        let dir = tempfile::tempdir().unwrap();
        let active = dir.path().join("active");
        let signer = P256Signer::random();
        let other = P256Signer::random();
        let payload = model_bytes(1024);

        let service = ModelLoadService::new(
            default_gate(),
            FileSystemActivator::new(&active, ActivationPolicy::default()),
        );

        let wrong_signer = other.package(&payload, "m", "1");
        let err = service.load(wrong_signer, &signer.trusted_key).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Rejected(RejectionReason::SignatureInvalid)
        ));

        let bad_key = signer.package(&payload, "m", "1");
        let err = service.load(bad_key, &"garbage".into()).unwrap_err();
        assert!(matches!(err, LoadError::Rejected(RejectionReason::KeyParseError)));

        assert!(!active.exists());
    }

    #[test]
    fn test_key_rotation_invalidates_old_signatures() {
        let old = P256Signer::random();
        let new = P256Signer::random();
        let gate = default_gate();
        let payload = model_bytes(256);

        let signed_by_old = old.package(&payload, "m", "1");
        assert!(gate.verify(&signed_by_old, &old.trusted_key).is_admitted());
        assert_eq!(
            gate.verify(&signed_by_old, &new.trusted_key),
            VerificationOutcome::Rejected(RejectionReason::SignatureInvalid)
        );
    }

    // =============================================================================
    // RUNTIME
    // =============================================================================

    #[test]
    fn test_runtime_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(8192);
        let args = write_package(dir.path(), &signer, &payload);
        let active = dir.path().join("active");

        let config = RuntimeConfig::from_sources(env(&active), &args).unwrap();
        let outcome = GateRuntime::new(config).unwrap().run().unwrap();

        let installed = active.join("detector-unknown.model");
        assert_eq!(outcome, RunOutcome::Activated(installed.clone()));
        assert_eq!(fs::read(installed).unwrap(), payload);
    }

    #[test]
    fn test_runtime_manifest_flow() {
        let dir = tempfile::tempdir().unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(2048);
        let mut args = write_package(dir.path(), &signer, &payload);
        let active = dir.path().join("active");

        let manifest = dir.path().join("detector.json");
        fs::write(
            &manifest,
            format!(
                r#"{{"model_id":"object_detector_v2","version":"2.1.0","sha256":"{}","allowed_versions":["2.0.0","2.1.0"]}}"#,
                shared_crypto::sha256_hex(&payload)
            ),
        )
        .unwrap();
        args[2] = manifest.display().to_string();

        let config = RuntimeConfig::from_sources(env(&active), &args).unwrap();
        let outcome = GateRuntime::new(config).unwrap().run().unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Activated(active.join("object_detector_v2-2.1.0.model"))
        );
    }

    #[test]
    fn test_runtime_disallowed_version_not_activated() {
        let dir = tempfile::tempdir().unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(512);
        let mut args = write_package(dir.path(), &signer, &payload);
        let active = dir.path().join("active");

        let manifest = dir.path().join("detector.json");
        fs::write(
            &manifest,
            format!(
                r#"{{"model_id":"detector","version":"1.0.0","sha256":"{}","allowed_versions":["2.1.0"]}}"#,
                shared_crypto::sha256_hex(&payload)
            ),
        )
        .unwrap();
        args[2] = manifest.display().to_string();

        let config = RuntimeConfig::from_sources(env(&active), &args).unwrap();
        let outcome = GateRuntime::new(config).unwrap().run().unwrap();
        assert!(matches!(outcome, RunOutcome::NotActivated(_)));
        assert!(!active.join("detector-1.0.0.model").exists());
    }

    #[test]
    fn test_runtime_records_metrics() {
        gate_telemetry::register_metrics().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(128);
        let args = write_package(dir.path(), &signer, &payload);
        fs::write(dir.path().join("detector.tflite"), model_bytes(129)).unwrap();

        let before = gate_telemetry::MODEL_VERIFICATIONS
            .with_label_values(&["rejected", "signature_invalid"])
            .get();

        let config = RuntimeConfig::from_sources(env(&dir.path().join("active")), &args).unwrap();
        let outcome = GateRuntime::new(config).unwrap().run().unwrap();
        assert_eq!(outcome, RunOutcome::Rejected(RejectionReason::SignatureInvalid));

        let after = gate_telemetry::MODEL_VERIFICATIONS
            .with_label_values(&["rejected", "signature_invalid"])
            .get();
        assert!(after >= before + 1.0);

        let text = gate_telemetry::encode_metrics().unwrap();
        assert!(text.contains("mg_model_verifications_total"));
        assert!(text.contains("mg_model_verification_duration_seconds"));
    }

    // =============================================================================
    // BATCH
    // =============================================================================

    #[test]
    fn test_batch_matches_individual_verification() {
        let gate = default_gate();
        let signer = P256Signer::random();
        let intruder = P256Signer::random();

        let packages: Vec<ModelPackage> = (0..16)
            .map(|i| {
                let payload = model_bytes(64 + i);
                if i % 4 == 0 {
                    intruder.package(&payload, "m", "1")
                } else {
                    signer.package(&payload, "m", "1")
                }
            })
            .collect();

        let batch = gate.verify_batch(&packages, &signer.trusted_key);
        assert_eq!(batch.admitted_count, 12);
        assert_eq!(batch.rejected_count, 4);

        for (package, outcome) in packages.iter().zip(&batch.outcomes) {
            assert_eq!(*outcome, gate.verify(package, &signer.trusted_key));
        }
    }

    #[test]
    fn test_empty_batch_not_all_admitted() {
        let gate = default_gate();
        let signer = P256Signer::random();
        let batch = gate.verify_batch(&[], &signer.trusted_key);
        assert!(!batch.all_admitted);
        assert_eq!(batch.admitted_count, 0);
    }
}
