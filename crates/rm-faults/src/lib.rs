//! # RM Faults
//!
//! WS-ReliableMessaging fault management: detects protocol violations in
//! inbound RM messages against persisted sequence state and builds the
//! SOAP fault message to send back.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure types, no I/O
//!   - `FaultKind`, `FaultDescriptor`, `DetailElement`
//!   - `SequenceId`, `AckBlock`, `ProtocolVersion`, `RmVersion`
//!   - Wire constants and reason texts
//!
//! - **Algorithms** (`algorithms/`): Range validation, message number
//!   bounds, detail element builders
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `FaultManagementApi`: Driving port (inbound API)
//!   - `InboundMessage`: Read-only view of the triggering message
//!   - `SequenceStore`: Driven port over persisted sequence state
//!   - `CreateSequencePolicy`: Accept/refuse decision for new sequences
//!
//! - **Application Layer** (`application/`)
//!   - `FaultDetector`: One independent check per fault kind
//!   - `FaultEnvelopeBuilder`: Descriptor to addressed `FaultMessage`
//!   - `FaultManagementService`: Implements `FaultManagementApi`
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `InMemorySequenceStore`, `AcceptAllPolicy`, `FnPolicy`, `RmMessage`
//!
//! ## Check Order
//!
//! Application messages: unknown sequence, sequence closed, last message
//! number exceeded, message number rollover. The first fault wins.
//!
//! ## Usage Example
//!
//! ```ignore
//! use rm_faults::{FaultManagementApi, FaultManagementService, InMemorySequenceStore, RmMessage};
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemorySequenceStore::new());
//! let service = FaultManagementService::new(store);
//!
//! let message = RmMessage::application("urn:uuid:seq-1", 1);
//! if let Some(fault) = service.check_application_message(&message).await? {
//!     // hand `fault` to the transport
//! }
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use adapters::{AcceptAllPolicy, FnPolicy, InMemorySequenceStore, RmMessage};
pub use application::{
    Destination, ExchangePattern, FaultDetector, FaultEnvelopeBuilder, FaultManagementService,
    FaultManagementServiceBuilder, FaultMessage, SoapFaultCode,
};
pub use config::FaultConfig;
pub use domain::{
    AckBlock, AckRange, AddressingNamespace, DetailElement, DetailError, FaultCode,
    FaultDescriptor, FaultError, FaultKind, MessageNumber, MessageType, ProtocolVersion,
    RmVersion, SequenceId, SequenceProperty, StoreError,
};
pub use metrics::{FaultMetrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{
    CreateSequencePolicy, FaultManagementApi, InboundMessage, PolicyDecision, SequenceStore,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the `subsystem` field on every fault check span.
pub const SUBSYSTEM: &str = "rm-faults";
