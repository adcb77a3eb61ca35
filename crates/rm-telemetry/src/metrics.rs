//! Prometheus metrics for RM fault management.
//!
//! All metrics follow the naming convention: `rm_faults_<metric>_total`
//!
//! `PrometheusRecorder` plugs these counters into the `MetricsRecorder`
//! hook of `FaultManagementService`.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use rm_faults::{FaultKind, MetricsRecorder};

use crate::TelemetryError;

lazy_static! {
    /// Registry holding every fault management metric
    pub static ref REGISTRY: Registry = Registry::new();

    /// Fault messages produced, by kind
    pub static ref FAULTS_EMITTED: IntCounterVec = IntCounterVec::new(
        Opts::new("rm_faults_emitted_total", "Fault messages produced by kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// Detail elements dropped during envelope construction, by kind
    pub static ref DETAILS_DROPPED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "rm_faults_details_dropped_total",
            "Fault details dropped because they could not be serialized"
        ),
        &["kind"]
    ).expect("metric creation failed");

    /// Checks that failed with an infrastructure error
    pub static ref INFRASTRUCTURE_ERRORS: IntCounter = IntCounter::new(
        "rm_faults_infrastructure_errors_total",
        "Fault checks that could not complete"
    ).expect("metric creation failed");
}

/// Register all metrics with `REGISTRY`. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(FAULTS_EMITTED.clone()),
        Box::new(DETAILS_DROPPED.clone()),
        Box::new(INFRASTRUCTURE_ERRORS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics in the Prometheus text exposition format.
pub fn gather_text() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// `MetricsRecorder` backed by the global Prometheus counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrometheusRecorder;

impl PrometheusRecorder {
    /// Register the counters and return a recorder.
    pub fn new() -> Result<Self, TelemetryError> {
        register_metrics()?;
        Ok(Self)
    }
}

impl MetricsRecorder for PrometheusRecorder {
    fn record_fault(&self, kind: FaultKind) {
        FAULTS_EMITTED.with_label_values(&[kind.as_str()]).inc();
    }

    fn record_detail_dropped(&self, kind: FaultKind) {
        DETAILS_DROPPED.with_label_values(&[kind.as_str()]).inc();
    }

    fn record_infrastructure_error(&self) {
        INFRASTRUCTURE_ERRORS.inc();
    }
}
