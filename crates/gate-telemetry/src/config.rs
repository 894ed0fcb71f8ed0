//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name reported in the startup event
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Prometheus textfile written when telemetry shuts down
    pub metrics_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "model-gate".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MG_SERVICE_NAME`: Service name (default: model-gate)
    /// - `MG_LOG_LEVEL` or `RUST_LOG`: Log level (default: info). `MG_LOG_LEVEL`
    ///   wins when both are set
    /// - `MG_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `MG_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `MG_METRICS_FILE`: Prometheus textfile path (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create configuration from `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("MG_SERVICE_NAME").unwrap_or_else(|| "model-gate".to_string()),

            log_level: lookup("MG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("MG_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),

            json_logs: lookup("MG_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),

            metrics_file: lookup("MG_METRICS_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Interpret a boolean environment value, falling back to `default` for
/// anything unrecognised.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
