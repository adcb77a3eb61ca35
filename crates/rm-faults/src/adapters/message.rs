//! Owned Inbound Message
//!
//! `RmMessage` implements `InboundMessage` over plain fields, for callers
//! that have already decoded the envelope and for tests.

use crate::domain::constants::{WSA_FINAL_NS, WSRM_1_0_NS};
use crate::domain::value_objects::{
    AckBlock, EndpointUri, MessageNumber, MessageType, ProtocolVersion, RmVersion, SequenceId,
};
use crate::ports::inbound::InboundMessage;

/// Decoded RM message parts.
#[derive(Clone, Debug)]
pub struct RmMessage {
    pub message_type: MessageType,
    pub message_id: Option<String>,
    pub sequence_id: Option<SequenceId>,
    pub message_number: Option<MessageNumber>,
    pub ack_blocks: Vec<AckBlock>,
    pub protocol_version: ProtocolVersion,
    pub addressing_namespace: String,
    pub rm_namespace: String,
    pub acks_to: Option<EndpointUri>,
}

impl RmMessage {
    fn empty(message_type: MessageType) -> Self {
        Self {
            message_type,
            message_id: None,
            sequence_id: None,
            message_number: None,
            ack_blocks: Vec::new(),
            protocol_version: ProtocolVersion::V1_1,
            addressing_namespace: WSA_FINAL_NS.to_string(),
            rm_namespace: WSRM_1_0_NS.to_string(),
            acks_to: None,
        }
    }

    /// Application message carrying a `Sequence` header.
    pub fn application(sequence_id: impl Into<SequenceId>, message_number: MessageNumber) -> Self {
        Self {
            sequence_id: Some(sequence_id.into()),
            message_number: Some(message_number),
            ..Self::empty(MessageType::Application)
        }
    }

    /// Standalone acknowledgement.
    pub fn acknowledgement(ack_blocks: Vec<AckBlock>) -> Self {
        Self {
            ack_blocks,
            ..Self::empty(MessageType::Acknowledgement)
        }
    }

    /// CreateSequence request declaring an AcksTo address.
    pub fn create_sequence(acks_to: impl Into<EndpointUri>) -> Self {
        Self {
            acks_to: Some(acks_to.into()),
            ..Self::empty(MessageType::CreateSequence)
        }
    }

    /// Message of the given type with no RM parts.
    pub fn of_type(message_type: MessageType) -> Self {
        Self::empty(message_type)
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.protocol_version = version;
        self
    }

    pub fn with_addressing_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.addressing_namespace = namespace.into();
        self
    }

    pub fn with_rm_version(mut self, version: RmVersion) -> Self {
        self.rm_namespace = version.namespace().to_string();
        self
    }

    pub fn with_rm_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.rm_namespace = namespace.into();
        self
    }

    pub fn with_ack_blocks(mut self, ack_blocks: Vec<AckBlock>) -> Self {
        self.ack_blocks = ack_blocks;
        self
    }
}

impl InboundMessage for RmMessage {
    fn message_type(&self) -> MessageType {
        self.message_type
    }

    fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    fn sequence_id(&self) -> Option<&SequenceId> {
        self.sequence_id.as_ref()
    }

    fn message_number(&self) -> Option<MessageNumber> {
        self.message_number
    }

    fn ack_blocks(&self) -> &[AckBlock] {
        &self.ack_blocks
    }

    fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    fn addressing_namespace(&self) -> &str {
        &self.addressing_namespace
    }

    fn rm_namespace(&self) -> &str {
        &self.rm_namespace
    }

    fn acks_to(&self) -> Option<&EndpointUri> {
        self.acks_to.as_ref()
    }
}
