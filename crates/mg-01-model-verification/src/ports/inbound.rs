//! # Inbound Ports (Driving Ports / API)
//!
//! The public verification API of this subsystem.

use crate::domain::entities::{
    AdmittedModel, BatchVerificationResult, ModelPackage, TrustedKey, VerificationOutcome,
};
use crate::domain::errors::RejectionReason;

/// Primary Model Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must not keep
/// any state between calls.
pub trait ModelVerificationApi: Send + Sync {
    /// Decide whether `package` is a valid endorsement under `trusted_key`.
    ///
    /// The outcome is a pure function of the two inputs.
    fn verify(&self, package: &ModelPackage, trusted_key: &TrustedKey) -> VerificationOutcome;

    /// Verify and, on success, turn the package into an `AdmittedModel`.
    ///
    /// On rejection the package is dropped here.
    fn admit(
        &self,
        package: ModelPackage,
        trusted_key: &TrustedKey,
    ) -> Result<AdmittedModel, RejectionReason>;

    /// Verify several independent packages in parallel.
    fn verify_batch(
        &self,
        packages: &[ModelPackage],
        trusted_key: &TrustedKey,
    ) -> BatchVerificationResult;
}
