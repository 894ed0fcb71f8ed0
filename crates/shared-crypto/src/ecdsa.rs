//! # ECDSA Signatures (P-256 / secp256k1)
//!
//! Verification-only ECDSA over a SHA-256 prehash.
//!
//! ## Security Properties
//!
//! - Keys are decoded from PEM SubjectPublicKeyInfo; the algorithm and curve
//!   OIDs are checked by the SPKI decoder, so a secp256k1 key never parses
//!   as P-256 and vice versa
//! - Signatures are verified against a 32-byte prehash, never against the
//!   raw message
//! - No signing keys live in this module outside of tests

use crate::{CryptoError, Hash};
use std::fmt;

/// Supported elliptic curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    P256,
    /// secp256k1
    Secp256k1,
}

impl Curve {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Curve::P256 => "p256",
            Curve::Secp256k1 => "secp256k1",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire encoding of an ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureEncoding {
    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`
    Der,
    /// Fixed-width big-endian `r || s` (64 bytes for 256-bit curves)
    Fixed,
}

impl SignatureEncoding {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureEncoding::Der => "der",
            SignatureEncoding::Fixed => "fixed",
        }
    }

    /// Smallest byte length a well-formed signature can have.
    pub fn min_len(&self) -> usize {
        match self {
            // 30 06 02 01 r 02 01 s
            SignatureEncoding::Der => 8,
            SignatureEncoding::Fixed => 64,
        }
    }

    /// Largest byte length a well-formed 256-bit curve signature can have.
    pub fn max_len(&self) -> usize {
        match self {
            // 30 44 02 21 00 r[32] 02 21 00 s[32]
            SignatureEncoding::Der => 72,
            SignatureEncoding::Fixed => 64,
        }
    }
}

impl fmt::Display for SignatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed ECDSA verifying key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcdsaPublicKey {
    /// NIST P-256 key
    P256(p256::ecdsa::VerifyingKey),
    /// secp256k1 key
    Secp256k1(k256::ecdsa::VerifyingKey),
}

impl EcdsaPublicKey {
    /// Decode a `BEGIN PUBLIC KEY` PEM container for the given curve.
    ///
    /// A single trailing NUL terminator (as stored by C toolchains) is
    /// tolerated; anything else around the container is an error.
    pub fn from_pem(curve: Curve, pem: &[u8]) -> Result<Self, CryptoError> {
        let pem = pem.strip_suffix(&[0u8]).unwrap_or(pem);
        let text = std::str::from_utf8(pem).map_err(|_| CryptoError::NotPem)?;

        match curve {
            Curve::P256 => {
                use p256::pkcs8::DecodePublicKey;
                p256::ecdsa::VerifyingKey::from_public_key_pem(text)
                    .map(EcdsaPublicKey::P256)
                    .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
            }
            Curve::Secp256k1 => {
                use k256::pkcs8::DecodePublicKey;
                k256::ecdsa::VerifyingKey::from_public_key_pem(text)
                    .map(EcdsaPublicKey::Secp256k1)
                    .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
            }
        }
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> Curve {
        match self {
            EcdsaPublicKey::P256(_) => Curve::P256,
            EcdsaPublicKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    /// Verify `signature` over a SHA-256 prehash.
    pub fn verify_prehash(
        &self,
        prehash: &Hash,
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<(), CryptoError> {
        use p256::ecdsa::signature::hazmat::PrehashVerifier;

        let malformed = CryptoError::InvalidSignatureFormat {
            encoding: encoding.name(),
        };

        match self {
            EcdsaPublicKey::P256(key) => {
                let sig = match encoding {
                    SignatureEncoding::Der => p256::ecdsa::Signature::from_der(signature),
                    SignatureEncoding::Fixed => p256::ecdsa::Signature::from_slice(signature),
                }
                .map_err(|_| malformed)?;

                key.verify_prehash(prehash, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
            EcdsaPublicKey::Secp256k1(key) => {
                let sig = match encoding {
                    SignatureEncoding::Der => k256::ecdsa::Signature::from_der(signature),
                    SignatureEncoding::Fixed => k256::ecdsa::Signature::from_slice(signature),
                }
                .map_err(|_| malformed)?;

                key.verify_prehash(prehash, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
