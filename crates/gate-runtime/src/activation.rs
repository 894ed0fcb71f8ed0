//! # Filesystem Activator
//!
//! Installs admitted models into the active directory.
//!
//! ## Security Notes
//!
//! - Accepts only `AdmittedModel`, so nothing unverified reaches the disk
//! - Manifest pins are checked after admission and can only refuse
//! - The digest pin is compared in constant time
//! - Installation writes a uniquely named temp file in the target directory
//!   and renames it, so readers never observe a partial or mixed model

use mg_01_model_verification::{ActivationError, AdmittedModel, ModelActivator, ModelDigest};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Post-admission constraints taken from the manifest.
///
/// `None` fields mean no manifest was supplied. `Some` of an empty version
/// list refuses every version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPolicy {
    /// Payload digest the manifest pins
    pub expected_digest: Option<ModelDigest>,
    /// Versions this device accepts
    pub allowed_versions: Option<Vec<String>>,
}

/// Activator that installs admitted payloads as files.
#[derive(Debug, Clone)]
pub struct FileSystemActivator {
    active_dir: PathBuf,
    policy: ActivationPolicy,
}

impl FileSystemActivator {
    /// Create an activator installing into `active_dir`.
    pub fn new(active_dir: impl Into<PathBuf>, policy: ActivationPolicy) -> Self {
        Self {
            active_dir: active_dir.into(),
            policy,
        }
    }

    /// Install directory.
    pub fn active_dir(&self) -> &Path {
        &self.active_dir
    }

    /// Install path for a model identity.
    pub fn target_path(&self, identifier: &str, version: &str) -> PathBuf {
        self.active_dir.join(format!(
            "{}-{}.model",
            sanitize(identifier),
            sanitize(version)
        ))
    }

    fn check_policy(&self, model: &AdmittedModel) -> Result<(), ActivationError> {
        if let Some(expected) = &self.policy.expected_digest {
            if !bool::from(expected[..].ct_eq(&model.digest()[..])) {
                return Err(ActivationError::Refused(format!(
                    "digest {} does not match manifest pin",
                    model.digest_hex()
                )));
            }
        }

        if let Some(allowed) = &self.policy.allowed_versions {
            if !allowed.iter().any(|v| v == model.version()) {
                return Err(ActivationError::Refused(format!(
                    "version {} not in allowed list",
                    model.version()
                )));
            }
        }

        Ok(())
    }
}

impl ModelActivator for FileSystemActivator {
    type Activated = PathBuf;

    fn activate(&self, model: AdmittedModel) -> Result<PathBuf, ActivationError> {
        self.check_policy(&model)?;

        let target = self.target_path(model.identifier(), model.version());

        fs::create_dir_all(&self.active_dir)
            .map_err(|e| ActivationError::Failed(format!("{}: {}", self.active_dir.display(), e)))?;

        // Unique per call; removed on drop if it never reaches `persist`
        let mut staging = NamedTempFile::new_in(&self.active_dir)
            .map_err(|e| ActivationError::Failed(format!("{}: {}", self.active_dir.display(), e)))?;
        let staging_path = staging.path().to_path_buf();

        staging
            .write_all(model.payload())
            .and_then(|()| staging.as_file().sync_all())
            .map_err(|e| ActivationError::Failed(format!("{}: {}", staging_path.display(), e)))?;

        staging
            .persist(&target)
            .map_err(|e| ActivationError::Failed(format!("{}: {}", target.display(), e.error)))?;
        debug!(staging = %staging_path.display(), "Staged payload renamed into place");

        info!(
            model_id = %model.identifier(),
            version = %model.version(),
            path = %target.display(),
            digest = %model.digest_hex(),
            "Model installed"
        );
        Ok(target)
    }
}

/// Replace characters outside `[A-Za-z0-9._-]` with `_` and neutralise a
/// leading dot.
fn sanitize(component: &str) -> String {
    let mut cleaned: String = component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        cleaned.push('_');
    }
    if cleaned.starts_with('.') {
        cleaned.replace_range(..1, "_");
    }
    cleaned
}
