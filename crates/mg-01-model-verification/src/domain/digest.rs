//! # Digest Engine
//!
//! SHA-256 over the full model payload. Pure: no state survives a call.

use super::entities::ModelDigest;
use super::errors::DigestError;
use crate::ports::outbound::DigestPrimitive;

/// Compute the payload digest.
///
/// # Errors
/// * `DigestError::EmptyPayload` - packages never carry empty payloads, so an
///   empty input means the caller bypassed `ModelPackage::new`
pub fn digest(payload: &[u8]) -> Result<ModelDigest, DigestError> {
    if payload.is_empty() {
        return Err(DigestError::EmptyPayload);
    }
    Ok(shared_crypto::sha256(payload))
}

/// Software SHA-256 digest engine.
///
/// The software implementation allocates nothing, so it never reports
/// `ResourceExhausted`; hardware-backed engines plugged in through
/// `DigestPrimitive` may.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256DigestEngine;

impl Sha256DigestEngine {
    /// Create a new digest engine.
    pub fn new() -> Self {
        Self
    }
}

impl DigestPrimitive for Sha256DigestEngine {
    fn digest(&self, payload: &[u8]) -> Result<ModelDigest, DigestError> {
        digest(payload)
    }
}
