//! Ports module for fault management
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{FaultManagementApi, InboundMessage};
pub use outbound::{CreateSequencePolicy, PolicyDecision, SequenceStore};
