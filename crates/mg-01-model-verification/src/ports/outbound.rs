//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the gate depends on: the digest and signature primitives
//! (trusted black boxes) and the model activation pipeline.

use crate::config::SignatureScheme;
use crate::domain::entities::{AdmittedModel, ModelDigest, TrustedKey};
use crate::domain::errors::{ActivationError, DigestError, PrimitiveError};

/// Fixed-size digest over an arbitrary non-empty payload.
///
/// Implementations must be deterministic and must keep all working state
/// local to the call.
pub trait DigestPrimitive: Send + Sync {
    /// Digest `payload`.
    ///
    /// # Errors
    /// Any failure must be reported; never return a placeholder digest.
    fn digest(&self, payload: &[u8]) -> Result<ModelDigest, DigestError>;
}

/// Asymmetric signature verification.
///
/// The key handle is produced and consumed within a single gate call and is
/// dropped on every exit path.
pub trait SignaturePrimitive: Send + Sync {
    /// Parsed key representation.
    type KeyHandle;

    /// Scheme this primitive implements.
    fn scheme(&self) -> SignatureScheme;

    /// Parse trusted key material into a handle.
    fn parse_key(&self, key: &TrustedKey) -> Result<Self::KeyHandle, PrimitiveError>;

    /// Check that `signature` endorses `digest` under `key`.
    fn verify_digest(
        &self,
        key: &Self::KeyHandle,
        digest: &ModelDigest,
        signature: &[u8],
    ) -> Result<(), PrimitiveError>;
}

/// The model activation pipeline.
///
/// Receives only `AdmittedModel`s, which the gate alone can produce.
pub trait ModelActivator: Send + Sync {
    /// Handle describing the activated model.
    type Activated;

    /// Activate an admitted model.
    ///
    /// # Errors
    /// * `ActivationError::Refused` - the activator declined the model
    /// * `ActivationError::Failed` - the activation target failed
    fn activate(&self, model: AdmittedModel) -> Result<Self::Activated, ActivationError>;
}
