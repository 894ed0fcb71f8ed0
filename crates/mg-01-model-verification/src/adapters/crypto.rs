//! # Crypto Primitive Adapter
//!
//! Implements `SignaturePrimitive` over the ECDSA wrappers in `shared-crypto`.
//!
//! ## Scheme Pinning
//!
//! The adapter is built for exactly one `(scheme, encoding)` pair. A key for
//! another curve fails to parse; a signature in another encoding fails to
//! decode. Neither falls back to an alternative.

use crate::config::{SignatureFormat, SignatureScheme};
use crate::domain::entities::{ModelDigest, TrustedKey};
use crate::domain::errors::PrimitiveError;
use crate::ports::outbound::SignaturePrimitive;
use shared_crypto::{CryptoError, EcdsaPublicKey};

/// ECDSA-over-SHA-256 signature primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignaturePrimitive {
    scheme: SignatureScheme,
    format: SignatureFormat,
}

impl EcdsaSignaturePrimitive {
    /// Create a primitive pinned to `scheme` and `format`.
    pub fn new(scheme: SignatureScheme, format: SignatureFormat) -> Self {
        Self { scheme, format }
    }

    /// P-256 with DER signatures.
    pub fn p256() -> Self {
        Self::new(SignatureScheme::EcdsaP256Sha256, SignatureFormat::Der)
    }

    /// Signature encoding this primitive decodes.
    pub fn format(&self) -> SignatureFormat {
        self.format
    }
}

impl Default for EcdsaSignaturePrimitive {
    fn default() -> Self {
        Self::p256()
    }
}

impl SignaturePrimitive for EcdsaSignaturePrimitive {
    type KeyHandle = EcdsaPublicKey;

    fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    fn parse_key(&self, key: &TrustedKey) -> Result<EcdsaPublicKey, PrimitiveError> {
        EcdsaPublicKey::from_pem(self.scheme.curve(), key.as_bytes())
            .map_err(|e| PrimitiveError::MalformedKey(e.to_string()))
    }

    fn verify_digest(
        &self,
        key: &EcdsaPublicKey,
        digest: &ModelDigest,
        signature: &[u8],
    ) -> Result<(), PrimitiveError> {
        key.verify_prehash(digest, signature, self.format.encoding())
            .map_err(|e| match e {
                CryptoError::SignatureVerificationFailed => PrimitiveError::Mismatch,
                other => PrimitiveError::MalformedSignature(other.to_string()),
            })
    }
}
