//! Metrics hooks for fault management
//!
//! Counts emitted faults per kind, detail downgrades and infrastructure
//! errors.
//!
//! ## Usage
//!
//! ```ignore
//! use rm_faults::metrics::{FaultMetrics, MetricsRecorder};
//!
//! let metrics = FaultMetrics::new();
//! metrics.record_fault(FaultKind::SequenceClosed);
//! assert_eq!(metrics.snapshot().sequence_closed, 1);
//! ```

use crate::domain::entities::FaultKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sink for fault management events.
///
/// Implement this to export to Prometheus, StatsD or similar.
pub trait MetricsRecorder: Send + Sync {
    /// A fault message was produced.
    fn record_fault(&self, kind: FaultKind);

    /// A detail element was dropped because it could not be attached.
    fn record_detail_dropped(&self, kind: FaultKind);

    /// A check or envelope build failed with an infrastructure error.
    fn record_infrastructure_error(&self);
}

/// In-process atomic counters.
#[derive(Default)]
pub struct FaultMetrics {
    pub create_sequence_refused: AtomicU64,
    pub last_message_number_exceeded: AtomicU64,
    pub unknown_sequence: AtomicU64,
    pub invalid_acknowledgement: AtomicU64,
    pub sequence_closed: AtomicU64,
    pub message_number_rollover: AtomicU64,
    pub details_dropped: AtomicU64,
    pub infrastructure_errors: AtomicU64,
}

impl FaultMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: FaultKind) -> &AtomicU64 {
        match kind {
            FaultKind::CreateSequenceRefused => &self.create_sequence_refused,
            FaultKind::LastMessageNumberExceeded => &self.last_message_number_exceeded,
            FaultKind::UnknownSequence => &self.unknown_sequence,
            FaultKind::InvalidAcknowledgement => &self.invalid_acknowledgement,
            FaultKind::SequenceClosed => &self.sequence_closed,
            FaultKind::MessageNumberRollover => &self.message_number_rollover,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            create_sequence_refused: self.create_sequence_refused.load(Ordering::Relaxed),
            last_message_number_exceeded: self.last_message_number_exceeded.load(Ordering::Relaxed),
            unknown_sequence: self.unknown_sequence.load(Ordering::Relaxed),
            invalid_acknowledgement: self.invalid_acknowledgement.load(Ordering::Relaxed),
            sequence_closed: self.sequence_closed.load(Ordering::Relaxed),
            message_number_rollover: self.message_number_rollover.load(Ordering::Relaxed),
            details_dropped: self.details_dropped.load(Ordering::Relaxed),
            infrastructure_errors: self.infrastructure_errors.load(Ordering::Relaxed),
        }
    }
}

impl MetricsRecorder for FaultMetrics {
    fn record_fault(&self, kind: FaultKind) {
        self.counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    fn record_detail_dropped(&self, _kind: FaultKind) {
        self.details_dropped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_infrastructure_error(&self) {
        self.infrastructure_errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub create_sequence_refused: u64,
    pub last_message_number_exceeded: u64,
    pub unknown_sequence: u64,
    pub invalid_acknowledgement: u64,
    pub sequence_closed: u64,
    pub message_number_rollover: u64,
    pub details_dropped: u64,
    pub infrastructure_errors: u64,
}

impl MetricsSnapshot {
    pub fn total_faults(&self) -> u64 {
        self.create_sequence_refused
            + self.last_message_number_exceeded
            + self.unknown_sequence
            + self.invalid_acknowledgement
            + self.sequence_closed
            + self.message_number_rollover
    }
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_fault(&self, _: FaultKind) {}
    fn record_detail_dropped(&self, _: FaultKind) {}
    fn record_infrastructure_error(&self) {}
}
