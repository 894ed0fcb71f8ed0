//! Fuzz target for trusted key parsing.
//!
//! ## Running
//!
//! ```bash
//! cd crates/mg-01-model-verification
//! cargo +nightly fuzz run fuzz_key_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use mg_01_model_verification::{EcdsaSignaturePrimitive, SignaturePrimitive, TrustedKey};

fuzz_target!(|data: &[u8]| {
    let primitive = EcdsaSignaturePrimitive::p256();
    let key = TrustedKey::new(data.to_vec());

    // Parse must return a result for any byte string
    let first = primitive.parse_key(&key).is_ok();
    let second = primitive.parse_key(&key).is_ok();
    assert_eq!(first, second);
});
