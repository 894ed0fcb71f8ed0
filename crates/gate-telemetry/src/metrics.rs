//! Prometheus metrics for the model gate.
//!
//! All metrics follow the naming convention: `mg_<subject>_<metric>_<unit>`
//!
//! Devices have no scrape endpoint, so metrics are exported through the
//! node-exporter textfile collector via `write_textfile`.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::fs;
use std::path::Path;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // VERIFICATION METRICS
    // =========================================================================

    /// Verification decisions by outcome and rejection reason
    pub static ref MODEL_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("mg_model_verifications_total", "Model verification decisions"),
        &["outcome", "reason"]  // outcome: admitted/rejected, reason: none or rejection reason
    ).expect("metric creation failed");

    /// Verification duration histogram
    pub static ref VERIFICATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "mg_model_verification_duration_seconds",
            "Time spent verifying a model package"
        ).buckets(exponential_buckets(0.0005, 2.0, 16).expect("valid bucket layout"))
    ).expect("metric creation failed");

    // =========================================================================
    // ACTIVATION METRICS
    // =========================================================================

    /// Activation attempts by result
    pub static ref MODEL_ACTIVATIONS: CounterVec = CounterVec::new(
        Opts::new("mg_model_activations_total", "Model activation attempts"),
        &["result"]  // result: activated/refused/failed
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Verification
        Box::new(MODEL_VERIFICATIONS.clone()),
        Box::new(VERIFICATION_DURATION.clone()),
        // Activation
        Box::new(MODEL_ACTIVATIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Record one verification decision.
///
/// `reason` is `None` for admissions.
pub fn record_verification(admitted: bool, reason: Option<&str>) {
    let outcome = if admitted { "admitted" } else { "rejected" };
    MODEL_VERIFICATIONS
        .with_label_values(&[outcome, reason.unwrap_or("none")])
        .inc();
}

/// Record one activation attempt.
pub fn record_activation(result: &str) {
    MODEL_ACTIVATIONS.with_label_values(&[result]).inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Write the encoded metrics to `path`.
///
/// Writes a sibling temp file first and renames it over `path`, so the
/// collector never reads a partial file.
pub fn write_textfile(path: &Path) -> Result<(), TelemetryError> {
    let body = encode_metrics()?;
    let tmp = path.with_extension("prom.tmp");
    fs::write(&tmp, body).map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
