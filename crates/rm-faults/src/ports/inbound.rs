//! Inbound Ports (Driving Ports / API)
//!
//! `InboundMessage` is the read-only view of the triggering message that
//! callers hand in; `FaultManagementApi` is what they call.

use crate::application::envelope::FaultMessage;
use crate::domain::errors::FaultError;
use crate::domain::value_objects::{
    AckBlock, EndpointUri, MessageNumber, MessageType, ProtocolVersion, SequenceId,
};
use async_trait::async_trait;

/// Read-only accessors over an inbound RM message.
///
/// Accessors for optional parts return `None` when the part is absent;
/// checks that need a part turn its absence into
/// `FaultError::MissingMessagePart`.
pub trait InboundMessage: Send + Sync {
    fn message_type(&self) -> MessageType;

    /// WS-Addressing message id, used for fault correlation.
    fn message_id(&self) -> Option<&str>;

    /// Identifier from the `Sequence` header.
    fn sequence_id(&self) -> Option<&SequenceId>;

    /// Message number from the `Sequence` header.
    fn message_number(&self) -> Option<MessageNumber>;

    /// `SequenceAcknowledgement` headers in receipt order.
    fn ack_blocks(&self) -> &[AckBlock];

    fn protocol_version(&self) -> ProtocolVersion;

    fn addressing_namespace(&self) -> &str;

    fn rm_namespace(&self) -> &str;

    /// AcksTo address declared in a CreateSequence body.
    fn acks_to(&self) -> Option<&EndpointUri>;
}

/// Fault management API.
///
/// Each method runs the checks for one message class in priority order and
/// returns the fault message for the first violation found. `Ok(None)`
/// means processing may continue.
#[async_trait]
pub trait FaultManagementApi: Send + Sync {
    /// Unknown sequence, then sequence closed, then last message number
    /// exceeded, then message number rollover.
    async fn check_application_message(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError>;

    /// Invalid acknowledgement. A no-op for other message types.
    async fn check_acknowledgement(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError>;

    /// Create sequence refused.
    async fn check_create_sequence(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError>;
}
