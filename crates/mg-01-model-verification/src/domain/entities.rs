//! # Domain Entities
//!
//! Core data structures for model verification.

use super::errors::{PackageError, RejectionReason};
use std::fmt;

/// SHA-256 digest of a model payload.
pub type ModelDigest = shared_crypto::Hash;

// =============================================================================
// Inputs
// =============================================================================

/// One candidate model to be considered for loading.
///
/// Immutable once built and not `Clone`: a package is consumed by a
/// single admit/reject decision.
pub struct ModelPackage {
    payload: Vec<u8>,
    signature: Vec<u8>,
    identifier: String,
    version: String,
}

impl ModelPackage {
    /// Placeholder for a missing identifier or version.
    pub const UNKNOWN: &'static str = "unknown";

    /// Build a package from received bytes.
    ///
    /// # Errors
    /// * `PackageError::EmptyPayload` - the payload has no bytes
    pub fn new(payload: Vec<u8>, signature: Vec<u8>) -> Result<Self, PackageError> {
        if payload.is_empty() {
            return Err(PackageError::EmptyPayload);
        }

        Ok(Self {
            payload,
            signature,
            identifier: Self::UNKNOWN.to_string(),
            version: Self::UNKNOWN.to_string(),
        })
    }

    /// Attach the audit identity. Never used as a trust input.
    pub fn with_identity(mut self, identifier: impl Into<String>, version: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self.version = version.into();
        self
    }

    /// Raw model content.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Detached signature over the payload digest.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Human-readable model name.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Human-readable model version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Debug for ModelPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelPackage")
            .field("identifier", &self.identifier)
            .field("version", &self.version)
            .field("payload_len", &self.payload.len())
            .field("signature_len", &self.signature.len())
            .finish()
    }
}

/// Public key material of the trusted publisher.
///
/// Opaque to the gate beyond "parseable in the configured scheme's format".
/// Borrowed read-only for each verification.
#[derive(Clone, PartialEq, Eq)]
pub struct TrustedKey {
    material: Vec<u8>,
}

impl TrustedKey {
    /// Wrap raw key material (PEM text for the ECDSA schemes).
    pub fn new(material: impl Into<Vec<u8>>) -> Self {
        Self {
            material: material.into(),
        }
    }

    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.material
    }

    /// Length of the key material in bytes.
    pub fn len(&self) -> usize {
        self.material.len()
    }

    /// Whether the key material is empty.
    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }
}

impl From<&str> for TrustedKey {
    fn from(pem: &str) -> Self {
        Self::new(pem.as_bytes())
    }
}

impl From<String> for TrustedKey {
    fn from(pem: String) -> Self {
        Self::new(pem.into_bytes())
    }
}

impl fmt::Debug for TrustedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustedKey")
            .field("len", &self.material.len())
            .finish()
    }
}

// =============================================================================
// Decision
// =============================================================================

/// States of a single verification attempt.
///
/// `Start → KeyParsed → Digested → SignatureChecked`, after which the attempt
/// is `Admitted`. A failure at any state goes straight to `Rejected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerificationStage {
    /// Nothing has been checked yet
    Start,
    /// The trusted key parsed into a handle
    KeyParsed,
    /// The payload digest was computed
    Digested,
    /// The signature primitive accepted the signature
    SignatureChecked,
}

impl VerificationStage {
    /// Stable snake_case label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStage::Start => "start",
            VerificationStage::KeyParsed => "key_parsed",
            VerificationStage::Digested => "digested",
            VerificationStage::SignatureChecked => "signature_checked",
        }
    }
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary result of the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// The signature is a valid endorsement of the payload
    Admitted,
    /// Anything else
    Rejected(RejectionReason),
}

impl VerificationOutcome {
    /// Whether the package may be activated.
    pub fn is_admitted(&self) -> bool {
        matches!(self, VerificationOutcome::Admitted)
    }

    /// Rejection reason, if any.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            VerificationOutcome::Admitted => None,
            VerificationOutcome::Rejected(reason) => Some(*reason),
        }
    }

    /// `admitted` or `rejected`.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Admitted => "admitted",
            VerificationOutcome::Rejected(_) => "rejected",
        }
    }
}

impl<T> From<&Result<T, RejectionReason>> for VerificationOutcome {
    fn from(result: &Result<T, RejectionReason>) -> Self {
        match result {
            Ok(_) => VerificationOutcome::Admitted,
            Err(reason) => VerificationOutcome::Rejected(*reason),
        }
    }
}

/// A package the gate has admitted.
///
/// Only the gate can build one, so holding an `AdmittedModel` is proof that
/// its payload passed verification. Activators accept nothing else.
pub struct AdmittedModel {
    package: ModelPackage,
    digest: ModelDigest,
}

impl AdmittedModel {
    pub(crate) fn new(package: ModelPackage, digest: ModelDigest) -> Self {
        Self { package, digest }
    }

    /// Model name from the package.
    pub fn identifier(&self) -> &str {
        self.package.identifier()
    }

    /// Model version from the package.
    pub fn version(&self) -> &str {
        self.package.version()
    }

    /// Verified payload.
    pub fn payload(&self) -> &[u8] {
        self.package.payload()
    }

    /// Digest the signature was checked against.
    pub fn digest(&self) -> &ModelDigest {
        &self.digest
    }

    /// Lowercase hex of the digest.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Take ownership of the verified payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.package.payload
    }
}

impl fmt::Debug for AdmittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmittedModel")
            .field("identifier", &self.package.identifier)
            .field("version", &self.package.version)
            .field("digest", &self.digest_hex())
            .finish()
    }
}

/// Result of verifying several packages.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Outcome per package, in input order
    pub outcomes: Vec<VerificationOutcome>,
    /// Whether every package was admitted
    pub all_admitted: bool,
    /// Count of admitted packages
    pub admitted_count: usize,
    /// Count of rejected packages
    pub rejected_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual outcomes.
    pub fn from_outcomes(outcomes: Vec<VerificationOutcome>) -> Self {
        let admitted_count = outcomes.iter().filter(|o| o.is_admitted()).count();
        let rejected_count = outcomes.len() - admitted_count;
        // An empty batch admits nothing.
        let all_admitted = !outcomes.is_empty() && rejected_count == 0;

        Self {
            outcomes,
            all_admitted,
            admitted_count,
            rejected_count,
        }
    }
}
