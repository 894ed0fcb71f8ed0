//! # Verification Gate
//!
//! Orchestrates key parsing, digesting and signature checking for one model
//! package and reduces the result to `Admitted` or `Rejected(reason)`.
//!
//! ## Security Notes
//!
//! - **Fixed Order**: parse key, digest payload, verify signature. No step is
//!   skippable and the first failure ends the attempt
//! - **Bounds First**: key, payload and signature sizes are checked before
//!   the corresponding primitive is invoked
//! - **Scoped Contexts**: the key handle and hasher state are locals of a
//!   single call and are dropped on every return path
//! - **Collapsed Diagnostics**: primitive error detail is logged, never
//!   surfaced as a distinct outcome

use super::digest::Sha256DigestEngine;
use super::entities::{
    AdmittedModel, BatchVerificationResult, ModelDigest, ModelPackage, TrustedKey,
    VerificationOutcome, VerificationStage,
};
use super::errors::RejectionReason;
use crate::adapters::crypto::EcdsaSignaturePrimitive;
use crate::config::{ConfigError, GateConfig};
use crate::ports::inbound::ModelVerificationApi;
use crate::ports::outbound::{DigestPrimitive, SignaturePrimitive};
use tracing::{debug, info, info_span, warn};

/// Rejection plus the detail that goes to the log only.
struct Failure {
    reason: RejectionReason,
    diagnostic: String,
}

impl Failure {
    fn new(reason: RejectionReason, diagnostic: impl ToString) -> Self {
        Self {
            reason,
            diagnostic: diagnostic.to_string(),
        }
    }
}

/// Fail-closed model verification gate.
///
/// Holds configuration and primitives only; no verification state survives
/// a call, so one gate can serve any number of threads.
pub struct VerificationGate<D = Sha256DigestEngine, S = EcdsaSignaturePrimitive> {
    config: GateConfig,
    digest: D,
    signer: S,
}

impl VerificationGate {
    /// Build a gate with the SHA-256 engine and the ECDSA primitive the
    /// configuration selects.
    pub fn from_config(config: GateConfig) -> Result<Self, ConfigError> {
        let signer = EcdsaSignaturePrimitive::new(config.scheme, config.signature_encoding);
        Self::with_primitives(config, Sha256DigestEngine::new(), signer)
    }
}

impl<D, S> VerificationGate<D, S>
where
    D: DigestPrimitive,
    S: SignaturePrimitive,
{
    /// Build a gate over explicit primitives.
    ///
    /// # Errors
    /// * any `GateConfig::validate` error
    /// * `ConfigError::SchemeMismatch` - `signer` implements a scheme other
    ///   than the configured one
    pub fn with_primitives(config: GateConfig, digest: D, signer: S) -> Result<Self, ConfigError> {
        config.validate()?;

        if signer.scheme() != config.scheme {
            return Err(ConfigError::SchemeMismatch {
                configured: config.scheme,
                primitive: signer.scheme(),
            });
        }

        Ok(Self {
            config,
            digest,
            signer,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the state machine and log the decision.
    fn decide(
        &self,
        package: &ModelPackage,
        trusted_key: &TrustedKey,
    ) -> Result<ModelDigest, RejectionReason> {
        let span = info_span!(
            "model_verification",
            model_id = %package.identifier(),
            version = %package.version(),
            scheme = %self.config.scheme,
        );
        let _enter = span.enter();

        match self.run(package, trusted_key) {
            Ok(digest) => {
                info!(
                    model_id = %package.identifier(),
                    version = %package.version(),
                    outcome = "admitted",
                    stage = %VerificationStage::SignatureChecked,
                    digest = %hex::encode(digest),
                    "Model signature verified"
                );
                Ok(digest)
            }
            Err(failure) => {
                warn!(
                    model_id = %package.identifier(),
                    version = %package.version(),
                    outcome = "rejected",
                    reason = failure.reason.as_str(),
                    stage = %failure.reason.failed_at(),
                    diagnostic = %failure.diagnostic,
                    "Model signature verification failed"
                );
                Err(failure.reason)
            }
        }
    }

    /// `Start → KeyParsed → Digested → SignatureChecked`.
    fn run(&self, package: &ModelPackage, trusted_key: &TrustedKey) -> Result<ModelDigest, Failure> {
        // Start -> KeyParsed
        if trusted_key.len() > self.config.max_key_bytes {
            return Err(Failure::new(
                RejectionReason::KeyParseError,
                format!(
                    "key material is {} bytes, limit {}",
                    trusted_key.len(),
                    self.config.max_key_bytes
                ),
            ));
        }
        let key_handle = self
            .signer
            .parse_key(trusted_key)
            .map_err(|e| Failure::new(RejectionReason::KeyParseError, e))?;
        debug!(stage = %VerificationStage::KeyParsed, "Trusted key parsed");

        // KeyParsed -> Digested
        let payload = package.payload();
        if payload.len() > self.config.max_payload_bytes {
            return Err(Failure::new(
                RejectionReason::DigestComputationError,
                format!(
                    "payload is {} bytes, limit {}",
                    payload.len(),
                    self.config.max_payload_bytes
                ),
            ));
        }
        let digest = self
            .digest
            .digest(payload)
            .map_err(|e| Failure::new(RejectionReason::DigestComputationError, e))?;
        debug!(
            stage = %VerificationStage::Digested,
            payload_len = payload.len(),
            "Payload digested"
        );

        // Digested -> SignatureChecked
        let signature = package.signature();
        if signature.is_empty() || signature.len() > self.config.max_signature_bytes {
            return Err(Failure::new(
                RejectionReason::SignatureInvalid,
                format!(
                    "signature is {} bytes, allowed 1..={}",
                    signature.len(),
                    self.config.max_signature_bytes
                ),
            ));
        }
        self.signer
            .verify_digest(&key_handle, &digest, signature)
            .map_err(|e| Failure::new(RejectionReason::SignatureInvalid, e))?;

        Ok(digest)
    }
}

impl<D, S> ModelVerificationApi for VerificationGate<D, S>
where
    D: DigestPrimitive,
    S: SignaturePrimitive,
{
    fn verify(&self, package: &ModelPackage, trusted_key: &TrustedKey) -> VerificationOutcome {
        VerificationOutcome::from(&self.decide(package, trusted_key))
    }

    fn admit(
        &self,
        package: ModelPackage,
        trusted_key: &TrustedKey,
    ) -> Result<AdmittedModel, RejectionReason> {
        let digest = self.decide(&package, trusted_key)?;
        Ok(AdmittedModel::new(package, digest))
    }

    fn verify_batch(
        &self,
        packages: &[ModelPackage],
        trusted_key: &TrustedKey,
    ) -> BatchVerificationResult {
        use rayon::prelude::*;

        let outcomes: Vec<VerificationOutcome> = packages
            .par_iter()
            .map(|package| self.verify(package, trusted_key))
            .collect();

        BatchVerificationResult::from_outcomes(outcomes)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
