//! # RM Telemetry
//!
//! Observability wiring for RM fault management.
//!
//! ## Components
//!
//! - **Tracing**: `tracing-subscriber` registry with `EnvFilter` and a
//!   pretty or JSON formatter
//! - **Logging**: `log_event!`, sharing the `subsystem` field of the
//!   fault check spans
//! - **Metrics**: Prometheus counters and `PrometheusRecorder`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rm_telemetry::{init_telemetry, PrometheusRecorder, TelemetryConfig};
//!
//! let recorder = init_telemetry(&TelemetryConfig::from_env())?;
//! let service = FaultManagementService::builder(store)
//!     .metrics(Arc::new(recorder))
//!     .build()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RM_SERVICE_NAME` | `rm-faults` | Service name in startup logs |
//! | `RM_LOG_LEVEL` | `RUST_LOG`, then `info` | Log filter directive |
//! | `RM_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `RM_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
pub mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{gather_text, register_metrics, PrometheusRecorder};
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the tracing subscriber.
///
/// Returns the recorder to hand to `FaultManagementService`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<PrometheusRecorder, TelemetryError> {
    let recorder = PrometheusRecorder::new()?;
    init_tracing(config)?;
    Ok(recorder)
}
