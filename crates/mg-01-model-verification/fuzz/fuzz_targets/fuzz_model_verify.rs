//! Fuzz target for the model verification gate.
//!
//! Feeds arbitrary payloads, signatures and key material through the gate.
//! Random input must never be admitted and must never panic.
//!
//! ## Running
//!
//! ```bash
//! cd crates/mg-01-model-verification
//! cargo +nightly fuzz run fuzz_model_verify
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use mg_01_model_verification::{
    GateConfig, ModelPackage, ModelVerificationApi, TrustedKey, VerificationGate,
    VerificationOutcome,
};

/// Fuzz input structure for a full verification attempt.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Model payload
    payload: Vec<u8>,
    /// Detached signature
    signature: Vec<u8>,
    /// Trusted key container
    key: Vec<u8>,
    /// Select the fixed-width encoding instead of DER
    fixed: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut config = GateConfig::default();
    if input.fixed {
        config = GateConfig::for_scheme(config.scheme, mg_01_model_verification::SignatureFormat::Fixed);
    }
    let gate = match VerificationGate::from_config(config) {
        Ok(gate) => gate,
        Err(_) => return,
    };

    // Empty payloads never form a package
    let package = match ModelPackage::new(input.payload, input.signature) {
        Ok(package) => package,
        Err(_) => return,
    };
    let key = TrustedKey::new(input.key);

    // Should NEVER panic, regardless of input
    let outcome = gate.verify(&package, &key);

    // 1. Outcome is deterministic
    assert_eq!(outcome, gate.verify(&package, &key));

    // 2. Random input is never admitted
    assert_ne!(outcome, VerificationOutcome::Admitted);
});
