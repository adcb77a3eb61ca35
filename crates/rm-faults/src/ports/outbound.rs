//! Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the fault manager needs from the surrounding RM runtime:
//! read access to persisted sequence state and the deployment's
//! sequence-acceptance policy.

use crate::domain::entities::{CreateSequenceRecord, NextMessageRecord};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::{SequenceId, SequenceProperty};
use crate::ports::inbound::InboundMessage;
use async_trait::async_trait;

/// Read-only view of the sequence store.
///
/// Implementations must return non-torn values for a single key. The fault
/// manager never writes, locks or retries.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Outbound existence check: create-sequence records for this id.
    async fn find_create_sequence_records(
        &self,
        sequence_id: &SequenceId,
    ) -> Result<Vec<CreateSequenceRecord>, StoreError>;

    /// Inbound existence check: every next-message record.
    async fn all_next_message_records(&self) -> Result<Vec<NextMessageRecord>, StoreError>;

    /// Raw value of one sequence property.
    async fn get_property(
        &self,
        sequence_id: &SequenceId,
        property: SequenceProperty,
    ) -> Result<Option<String>, StoreError>;
}

/// Outcome of a create-sequence policy evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyDecision {
    Accept,
    Refuse { reason: String },
}

/// Decides whether an inbound CreateSequence is accepted.
///
/// The rule is deployment-specific; the protocol only defines the fault.
pub trait CreateSequencePolicy: Send + Sync {
    fn evaluate(&self, request: &dyn InboundMessage) -> PolicyDecision;
}
