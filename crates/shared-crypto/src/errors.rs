//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key container could not be decoded
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Key material is not valid UTF-8 PEM text
    #[error("Public key is not PEM text")]
    NotPem,

    /// Signature bytes do not decode in the requested encoding
    #[error("Invalid signature format ({encoding})")]
    InvalidSignatureFormat {
        /// Encoding the bytes were decoded as
        encoding: &'static str,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,
}
