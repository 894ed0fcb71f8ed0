//! Runtime configuration from environment variables and arguments.

use crate::error::RuntimeError;
use mg_01_model_verification::GateConfig;
use std::path::PathBuf;
use tracing::warn;

/// Default trusted key location on provisioned devices.
pub const DEFAULT_TRUSTED_KEY_PATH: &str = "/etc/device/trusted_keys/model_signing_key.pem";

/// Default install directory for admitted models.
pub const DEFAULT_ACTIVE_DIR: &str = "/var/lib/model-gate/active";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Trusted key PEM file
    pub trusted_key_path: PathBuf,
    /// Model payload file
    pub model_path: PathBuf,
    /// Detached signature file
    pub signature_path: PathBuf,
    /// Optional model manifest
    pub manifest_path: Option<PathBuf>,
    /// Directory admitted models are installed into
    pub active_dir: PathBuf,
    /// Verification gate configuration
    pub gate: GateConfig,
}

impl RuntimeConfig {
    /// Load configuration from the process environment and `args`
    /// (program name excluded).
    pub fn from_env(args: &[String]) -> Result<Self, RuntimeError> {
        Self::from_sources(|name| std::env::var(name).ok(), args)
    }

    /// Load configuration from `lookup` and `args`.
    ///
    /// Positional arguments are `MODEL SIGNATURE [MANIFEST [KEY]]` and take
    /// precedence over the matching environment variables.
    ///
    /// # Errors
    /// * `RuntimeError::MissingInput` - no model or signature path
    /// * `RuntimeError::Config` - unknown scheme or encoding, or bounds that
    ///   fail validation
    pub fn from_sources<F>(lookup: F, args: &[String]) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let arg = |index: usize| args.get(index).filter(|a| !a.is_empty()).map(PathBuf::from);
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let model_path = arg(0)
            .or_else(|| var("MG_MODEL_PATH").map(PathBuf::from))
            .ok_or(RuntimeError::MissingInput("model path"))?;

        let signature_path = arg(1)
            .or_else(|| var("MG_SIGNATURE_PATH").map(PathBuf::from))
            .ok_or(RuntimeError::MissingInput("signature path"))?;

        let manifest_path = arg(2).or_else(|| var("MG_MANIFEST_PATH").map(PathBuf::from));

        let trusted_key_path = arg(3)
            .or_else(|| var("MODEL_SIGNING_PUBLIC_KEY").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TRUSTED_KEY_PATH));

        let active_dir = var("MG_ACTIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ACTIVE_DIR));

        let mut gate = GateConfig::default();

        if let Some(scheme) = var("MG_SIGNATURE_SCHEME") {
            gate.scheme = scheme.parse()?;
        }

        if let Some(encoding) = var("MG_SIGNATURE_ENCODING") {
            let format = encoding.parse()?;
            gate = GateConfig {
                max_payload_bytes: gate.max_payload_bytes,
                max_key_bytes: gate.max_key_bytes,
                ..GateConfig::for_scheme(gate.scheme, format)
            };
        }

        if let Some(bound) = var("MG_MAX_PAYLOAD_BYTES") {
            match bound.trim().parse::<usize>() {
                Ok(b) => gate.max_payload_bytes = b,
                Err(_) => warn!(value = %bound, "MG_MAX_PAYLOAD_BYTES is not a byte count, keeping default"),
            }
        }

        gate.validate()?;

        Ok(Self {
            trusted_key_path,
            model_path,
            signature_path,
            manifest_path,
            active_dir,
            gate,
        })
    }
}
