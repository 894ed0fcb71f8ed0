//! # Gate Configuration
//!
//! Scheme selection and the size bounds checked before any primitive runs.
//!
//! ## Security Requirements
//!
//! - The scheme defaults to ECDSA P-256 over SHA-256; secp256k1 must be
//!   selected explicitly
//! - Unknown scheme or encoding names are errors, never defaults

use serde::{Deserialize, Serialize};
use shared_crypto::{Curve, SignatureEncoding};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default payload bound (512 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Default key material bound (8 KiB).
pub const DEFAULT_MAX_KEY_BYTES: usize = 8 * 1024;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Scheme name not recognised
    #[error("Unknown signature scheme: {0}")]
    UnknownScheme(String),

    /// Signature encoding name not recognised
    #[error("Unknown signature format: {0}")]
    UnknownSignatureFormat(String),

    /// A size bound was set to zero
    #[error("{0} must be greater than zero")]
    ZeroBound(&'static str),

    /// The signature bound cannot fit a well-formed signature
    #[error("max_signature_bytes {actual} is below the {format} minimum of {min}")]
    SignatureBoundTooSmall {
        format: SignatureFormat,
        min: usize,
        actual: usize,
    },

    /// The injected signature primitive implements a different scheme
    #[error("Configured scheme {configured} but primitive implements {primitive}")]
    SchemeMismatch {
        configured: SignatureScheme,
        primitive: SignatureScheme,
    },
}

/// Signature scheme the gate enforces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureScheme {
    /// ECDSA over NIST P-256 with a SHA-256 digest
    #[default]
    #[serde(rename = "ecdsa-p256-sha256")]
    EcdsaP256Sha256,
    /// ECDSA over secp256k1 with a SHA-256 digest
    #[serde(rename = "ecdsa-secp256k1-sha256")]
    EcdsaSecp256k1Sha256,
}

impl SignatureScheme {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaP256Sha256 => "ecdsa-p256-sha256",
            SignatureScheme::EcdsaSecp256k1Sha256 => "ecdsa-secp256k1-sha256",
        }
    }

    /// Curve the scheme runs on.
    pub fn curve(&self) -> Curve {
        match self {
            SignatureScheme::EcdsaP256Sha256 => Curve::P256,
            SignatureScheme::EcdsaSecp256k1Sha256 => Curve::Secp256k1,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecdsa-p256-sha256" | "p256" | "p-256" | "secp256r1" | "prime256v1" => {
                Ok(SignatureScheme::EcdsaP256Sha256)
            }
            "ecdsa-secp256k1-sha256" | "secp256k1" => Ok(SignatureScheme::EcdsaSecp256k1Sha256),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

/// Wire encoding of detached signatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureFormat {
    /// ASN.1 DER, as produced by OpenSSL and mbedTLS
    #[default]
    Der,
    /// Fixed-width `r || s`
    Fixed,
}

impl SignatureFormat {
    /// Encoding understood by the primitive layer.
    pub fn encoding(&self) -> SignatureEncoding {
        match self {
            SignatureFormat::Der => SignatureEncoding::Der,
            SignatureFormat::Fixed => SignatureEncoding::Fixed,
        }
    }
}

impl fmt::Display for SignatureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding().name())
    }
}

impl FromStr for SignatureFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "der" | "asn1" => Ok(SignatureFormat::Der),
            "fixed" | "raw" => Ok(SignatureFormat::Fixed),
            _ => Err(ConfigError::UnknownSignatureFormat(s.to_string())),
        }
    }
}

/// Verification gate configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Enforced signature scheme.
    pub scheme: SignatureScheme,
    /// Signature wire encoding.
    pub signature_encoding: SignatureFormat,
    /// Largest payload the gate will digest.
    pub max_payload_bytes: usize,
    /// Largest key container the gate will parse.
    pub max_key_bytes: usize,
    /// Largest signature the gate will hand to the primitive.
    pub max_signature_bytes: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            scheme: SignatureScheme::default(),
            signature_encoding: SignatureFormat::default(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_key_bytes: DEFAULT_MAX_KEY_BYTES,
            max_signature_bytes: SignatureEncoding::Der.max_len(),
        }
    }
}

impl GateConfig {
    /// Default bounds for an explicitly chosen scheme and encoding.
    pub fn for_scheme(scheme: SignatureScheme, format: SignatureFormat) -> Self {
        Self {
            scheme,
            signature_encoding: format,
            max_signature_bytes: format.encoding().max_len(),
            ..Self::default()
        }
    }

    /// Validate bounds.
    ///
    /// # Errors
    /// * `ConfigError::ZeroBound` - any bound is zero
    /// * `ConfigError::SignatureBoundTooSmall` - the signature bound cannot
    ///   hold a well-formed signature in the configured encoding
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::ZeroBound("max_payload_bytes"));
        }
        if self.max_key_bytes == 0 {
            return Err(ConfigError::ZeroBound("max_key_bytes"));
        }
        if self.max_signature_bytes == 0 {
            return Err(ConfigError::ZeroBound("max_signature_bytes"));
        }

        let min = self.signature_encoding.encoding().min_len();
        if self.max_signature_bytes < min {
            return Err(ConfigError::SignatureBoundTooSmall {
                format: self.signature_encoding,
                min,
                actual: self.max_signature_bytes,
            });
        }

        Ok(())
    }
}
