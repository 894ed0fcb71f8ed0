//! # Model-Gate
//!
//! Verifies a model package and installs it only if its signature checks
//! out against the device's trusted key.
//!
//! ```text
//! model-gate MODEL SIGNATURE [MANIFEST [KEY]]
//! ```
//!
//! ## Exit Codes
//!
//! - `0` model admitted and installed
//! - `2` model rejected or not activated
//! - `1` configuration or I/O failure

use std::process::ExitCode;

use anyhow::{Context, Result};
use gate_runtime::{GateRuntime, RunOutcome, RuntimeConfig};
use gate_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{error, info, warn};

fn run() -> Result<RunOutcome> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RuntimeConfig::from_env(&args).context("loading runtime configuration")?;

    info!(
        model = %config.model_path.display(),
        trusted_key = %config.trusted_key_path.display(),
        scheme = %config.gate.scheme,
        "Starting model load"
    );

    let runtime = GateRuntime::new(config).context("building gate runtime")?;
    runtime.run().context("running model load")
}

fn main() -> ExitCode {
    let telemetry = match init_telemetry(TelemetryConfig::from_env()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("telemetry disabled: {}", e);
            None
        }
    };

    let code = match run() {
        Ok(RunOutcome::Activated(path)) => {
            info!(path = %path.display(), "Model loaded");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Rejected(reason)) => {
            warn!(reason = reason.as_str(), "Model rejected");
            ExitCode::from(2)
        }
        Ok(RunOutcome::NotActivated(detail)) => {
            warn!(detail = %detail, "Model not activated");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %format!("{:#}", e), "Model load failed");
            ExitCode::from(1)
        }
    };

    drop(telemetry);
    code
}
