//! # Gate Telemetry
//!
//! Structured logging and Prometheus metrics for Model-Gate devices.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with JSON or human-readable output
//! - **Metrics**: Prometheus counters and histograms exported as a textfile
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MG_SERVICE_NAME` | `model-gate` | Service name in logs |
//! | `MG_LOG_LEVEL` | `info` | Log level filter |
//! | `MG_JSON_LOGS` | `false` (`true` in containers) | JSON log output |
//! | `MG_METRICS_FILE` | unset | Prometheus textfile written on shutdown |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_activation, record_verification, register_metrics, write_textfile,
    HistogramTimer, MODEL_ACTIVATIONS, MODEL_VERIFICATIONS,
    VERIFICATION_DURATION,
};
pub use tracing_setup::init_tracing;

use std::path::PathBuf;
use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Failed to export metrics: {0}")]
    MetricsExport(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
/// When dropped, it writes the metrics textfile if one is configured.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;

    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        metrics_file: config.metrics_file,
    })
}

/// Guard that keeps telemetry active. Drop to flush metrics.
pub struct TelemetryGuard {
    metrics_file: Option<PathBuf>,
}

impl TelemetryGuard {
    /// Write the metrics textfile now, if one is configured.
    pub fn flush(&self) -> Result<(), TelemetryError> {
        match &self.metrics_file {
            Some(path) => write_textfile(path),
            None => Ok(()),
        }
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Metrics textfile not written");
        }
    }
}
