//! # Model-Gate Runtime
//!
//! Device-side load path: read a package from disk, verify it, and install
//! it only when the gate admits it.
//!
//! ## Load Sequence
//!
//! 1. Read the trusted key, signature and payload under their size bounds
//! 2. Read the manifest, if one is configured
//! 3. Hand the package to `ModelLoadService`, the single decision point
//! 4. Install admitted models through `FileSystemActivator`
//! 5. Record the decision in the process metrics

pub mod activation;
pub mod config;
pub mod error;
pub mod manifest;
pub mod package_source;

pub use activation::{ActivationPolicy, FileSystemActivator};
pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use manifest::ModelManifest;

use gate_telemetry::{record_activation, record_verification, HistogramTimer, VERIFICATION_DURATION};
use mg_01_model_verification::{
    ActivationError, LoadError, ModelLoadService, ModelPackage, RejectionReason, TrustedKey,
    VerificationGate,
};
use package_source::{read_bounded, BoundedRead};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Final result of one runtime invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Model admitted and installed at this path
    Activated(PathBuf),
    /// Model refused by the gate
    Rejected(RejectionReason),
    /// Model admitted but the activator declined or failed
    NotActivated(String),
}

/// Package inputs once read from disk.
enum Inputs {
    Ready(ModelPackage, TrustedKey),
    Refused(RejectionReason),
}

/// Runtime wiring the gate, the manifest and the filesystem activator.
pub struct GateRuntime {
    config: RuntimeConfig,
}

impl GateRuntime {
    /// Create a runtime, validating the gate configuration.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        config.gate.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run one load attempt.
    ///
    /// # Errors
    /// I/O, manifest and configuration failures. Rejections and activation
    /// refusals are outcomes, not errors.
    pub fn run(&self) -> Result<RunOutcome, RuntimeError> {
        let manifest = match &self.config.manifest_path {
            Some(path) => Some(ModelManifest::load(path)?),
            None => None,
        };

        let (identifier, version) = match &manifest {
            Some(m) => (m.model_id.clone(), m.version.clone()),
            None => (file_stem(&self.config.model_path), ModelPackage::UNKNOWN.to_string()),
        };

        let policy = match &manifest {
            Some(m) => ActivationPolicy {
                expected_digest: Some(m.pinned_digest().map_err(|reason| {
                    RuntimeError::Manifest {
                        path: self.config.manifest_path.clone().unwrap_or_default(),
                        reason,
                    }
                })?),
                allowed_versions: Some(m.allowed_versions.clone()),
            },
            None => ActivationPolicy::default(),
        };

        let (package, trusted_key) = match self.read_inputs()? {
            Inputs::Ready(package, key) => (package.with_identity(identifier, version), key),
            Inputs::Refused(reason) => {
                warn!(
                    model_id = %identifier,
                    version = %version,
                    reason = reason.as_str(),
                    "Model input exceeds configured bound"
                );
                record_verification(false, Some(reason.as_str()));
                return Ok(RunOutcome::Rejected(reason));
            }
        };

        let gate = VerificationGate::from_config(self.config.gate.clone())?;
        let activator = FileSystemActivator::new(&self.config.active_dir, policy);
        let service = ModelLoadService::new(gate, activator);

        let result = {
            let _timer = HistogramTimer::new(&VERIFICATION_DURATION);
            service.load(package, &trusted_key)
        };

        let outcome = match result {
            Ok(path) => {
                record_verification(true, None);
                record_activation("activated");
                RunOutcome::Activated(path)
            }
            Err(LoadError::Rejected(reason)) => {
                record_verification(false, Some(reason.as_str()));
                RunOutcome::Rejected(reason)
            }
            Err(LoadError::Activation(e)) => {
                record_verification(true, None);
                record_activation(match e {
                    ActivationError::Refused(_) => "refused",
                    ActivationError::Failed(_) => "failed",
                });
                RunOutcome::NotActivated(e.to_string())
            }
        };

        info!(outcome = ?outcome, "Load attempt finished");
        Ok(outcome)
    }

    /// Read key, signature and payload, applying each bound before the
    /// content is buffered.
    fn read_inputs(&self) -> Result<Inputs, RuntimeError> {
        let gate = &self.config.gate;

        let key = match read_bounded(&self.config.trusted_key_path, gate.max_key_bytes)? {
            BoundedRead::Within(bytes) => TrustedKey::new(bytes),
            BoundedRead::TooLarge(_) => return Ok(Inputs::Refused(RejectionReason::KeyParseError)),
        };

        let payload = match read_bounded(&self.config.model_path, gate.max_payload_bytes)? {
            BoundedRead::Within(bytes) => bytes,
            BoundedRead::TooLarge(_) => {
                return Ok(Inputs::Refused(RejectionReason::DigestComputationError))
            }
        };

        let signature = match read_bounded(&self.config.signature_path, gate.max_signature_bytes)? {
            BoundedRead::Within(bytes) => bytes,
            BoundedRead::TooLarge(_) => return Ok(Inputs::Refused(RejectionReason::SignatureInvalid)),
        };

        match ModelPackage::new(payload, signature) {
            Ok(package) => Ok(Inputs::Ready(package, key)),
            Err(_) => Ok(Inputs::Refused(RejectionReason::DigestComputationError)),
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| ModelPackage::UNKNOWN.to_string())
}

// =============================================================================
// TEST HELPERS
// =============================================================================
