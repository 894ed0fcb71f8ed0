//! Runtime error type.

use mg_01_model_verification::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the runtime before a load decision is reached.
///
/// None of these ever result in a model being installed.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Gate configuration is invalid
    #[error("Invalid gate configuration: {0}")]
    Config(#[from] ConfigError),

    /// A required input path was not supplied
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// Reading an input file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be parsed
    #[error("Invalid manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },
}

impl RuntimeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RuntimeError::Io {
            path: path.into(),
            source,
        }
    }
}
