//! # Verification Errors
//!
//! The closed rejection taxonomy plus the errors of the collaborators the
//! gate talks to.

use super::entities::VerificationStage;
use thiserror::Error;

/// Why a package was rejected.
///
/// This set is closed. Every failure inside the gate is classified into one
/// of these kinds at the point where it is detected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Trusted key material is malformed or uses an unsupported format/curve
    #[error("Trusted key could not be parsed")]
    KeyParseError,

    /// The digest primitive failed
    #[error("Payload digest could not be computed")]
    DigestComputationError,

    /// The signature does not validate against the computed digest and key
    #[error("Signature is invalid")]
    SignatureInvalid,
}

impl RejectionReason {
    /// Stable snake_case label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::KeyParseError => "key_parse_error",
            RejectionReason::DigestComputationError => "digest_computation_error",
            RejectionReason::SignatureInvalid => "signature_invalid",
        }
    }

    /// Last state the verification reached before failing.
    pub fn failed_at(&self) -> VerificationStage {
        match self {
            RejectionReason::KeyParseError => VerificationStage::Start,
            RejectionReason::DigestComputationError => VerificationStage::KeyParsed,
            RejectionReason::SignatureInvalid => VerificationStage::Digested,
        }
    }
}

/// Errors building a `ModelPackage`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackageError {
    /// The payload has no bytes
    #[error("Model payload is empty")]
    EmptyPayload,
}

/// Errors from the digest primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DigestError {
    /// Digest requested over zero bytes
    #[error("Refusing to digest an empty payload")]
    EmptyPayload,

    /// The primitive could not obtain the resources it needs
    #[error("Digest primitive exhausted resources: {0}")]
    ResourceExhausted(String),
}

/// Diagnostics returned by the signature primitive.
///
/// These never reach the caller as distinct outcomes; the gate collapses
/// them into `KeyParseError` or `SignatureInvalid` and logs the detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Key material could not be decoded
    #[error("Malformed key material: {0}")]
    MalformedKey(String),

    /// Signature bytes could not be decoded
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// Signature decoded but does not endorse the digest
    #[error("Signature does not match digest")]
    Mismatch,
}

/// Errors from the activation port.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The activator declined the admitted model
    #[error("Activation refused: {0}")]
    Refused(String),

    /// The activation target failed
    #[error("Activation failed: {0}")]
    Failed(String),
}

/// Errors from the load decision point.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The gate rejected the package; it was not activated
    #[error("Model rejected: {0}")]
    Rejected(#[from] RejectionReason),

    /// The package was admitted but activation did not complete
    #[error(transparent)]
    Activation(#[from] ActivationError),
}

impl LoadError {
    /// Rejection reason, if the gate refused the package.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            LoadError::Rejected(reason) => Some(*reason),
            LoadError::Activation(_) => None,
        }
    }
}
