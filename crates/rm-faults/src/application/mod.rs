//! Application Layer
//!
//! Detector checks, envelope construction and the service that wires them
//! behind `FaultManagementApi`.

pub mod detector;
pub mod envelope;
pub mod service;

pub use detector::{CheckResult, FaultDetector};
pub use envelope::{
    Destination, ExchangePattern, FaultEnvelopeBuilder, FaultMessage, SoapFaultCode,
};
pub use service::{FaultManagementService, FaultManagementServiceBuilder};
