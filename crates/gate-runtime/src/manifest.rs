//! # Model Manifest
//!
//! JSON sidecar naming the model, pinning its digest and listing the
//! versions this device accepts.
//!
//! ```json
//! {
//!   "model_id": "object_detector_v2",
//!   "version": "2.1.0",
//!   "sha256": "abc123...",
//!   "allowed_versions": ["2.0.0", "2.1.0"]
//! }
//! ```
//!
//! `sha256` is required. A missing `allowed_versions` is an empty list, which
//! refuses every version. The manifest is unsigned: its pins only ever narrow
//! what the gate admitted, and nothing in it can admit a package.

use crate::error::RuntimeError;
use mg_01_model_verification::ModelDigest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Manifest upper bound; manifests are a few hundred bytes.
const MAX_MANIFEST_BYTES: u64 = 64 * 1024;

/// Model manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Model identifier
    pub model_id: String,
    /// Model version
    pub version: String,
    /// Expected SHA-256 of the payload, hex
    pub sha256: String,
    /// Versions the device accepts
    #[serde(default)]
    pub allowed_versions: Vec<String>,
}

impl ModelManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        let invalid = |reason: String| RuntimeError::Manifest {
            path: path.to_path_buf(),
            reason,
        };

        let len = fs::metadata(path)
            .map_err(|e| RuntimeError::io(path, e))?
            .len();
        if len > MAX_MANIFEST_BYTES {
            return Err(invalid(format!("{} bytes exceeds {}", len, MAX_MANIFEST_BYTES)));
        }

        let body = fs::read(path).map_err(|e| RuntimeError::io(path, e))?;
        let manifest: Self = serde_json::from_slice(&body).map_err(|e| invalid(e.to_string()))?;
        manifest.pinned_digest().map_err(invalid)?;
        Ok(manifest)
    }

    /// Decoded digest pin.
    pub fn pinned_digest(&self) -> Result<ModelDigest, String> {
        let bytes = hex::decode(self.sha256.trim()).map_err(|e| format!("sha256: {}", e))?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| format!("sha256: expected 32 bytes, got {}", b.len()))
    }
}
