//! Value objects for fault management
//!
//! Identifiers, message numbers, acknowledgement ranges and the protocol
//! version selectors that pick the wire vocabulary.

use super::constants::{
    SOAP11_ENVELOPE_NS, SOAP11_FAULT_CODE_SENDER, SOAP12_ENVELOPE_NS, SOAP12_FAULT_CODE_SENDER,
    WSA_FINAL_ANONYMOUS_URI, WSA_FINAL_NS, WSA_SUBMISSION_ANONYMOUS_URI, WSA_SUBMISSION_NS,
    WSRM_1_0_NS, WSRM_1_1_NS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Producer-assigned message number. Valid numbers start at 1.
pub type MessageNumber = u64;

/// Endpoint address as carried in an EPR.
pub type EndpointUri = String;

/// Opaque identifier of a reliable sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId(String);

impl SequenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SequenceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SequenceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Inclusive span of acknowledged message numbers.
///
/// A range with `lower > upper` is representable on purpose: receiving one
/// is a protocol fault, not a decoding error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AckRange {
    pub lower: MessageNumber,
    pub upper: MessageNumber,
}

impl AckRange {
    pub fn new(lower: MessageNumber, upper: MessageNumber) -> Self {
        Self { lower, upper }
    }

    /// `lower <= upper`
    pub fn is_valid(&self) -> bool {
        self.lower <= self.upper
    }
}

/// One `SequenceAcknowledgement` header: the acknowledged sequence and its
/// ranges in receipt order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckBlock {
    pub sequence_id: SequenceId,
    pub ranges: Vec<AckRange>,
}

impl AckBlock {
    pub fn new(sequence_id: impl Into<SequenceId>, ranges: Vec<AckRange>) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            ranges,
        }
    }
}

/// SOAP envelope version of the triggering exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[default]
    V1_1,
    V1_2,
}

impl ProtocolVersion {
    pub fn envelope_namespace(&self) -> &'static str {
        match self {
            ProtocolVersion::V1_1 => SOAP11_ENVELOPE_NS,
            ProtocolVersion::V1_2 => SOAP12_ENVELOPE_NS,
        }
    }

    /// Local name of the sender fault code in this version's vocabulary.
    pub fn sender_code_name(&self) -> &'static str {
        match self {
            ProtocolVersion::V1_1 => SOAP11_FAULT_CODE_SENDER,
            ProtocolVersion::V1_2 => SOAP12_FAULT_CODE_SENDER,
        }
    }
}

/// WS-RM specification revision, selecting the namespace of detail elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RmVersion {
    #[default]
    V1_0,
    V1_1,
}

impl RmVersion {
    pub fn namespace(&self) -> &'static str {
        match self {
            RmVersion::V1_0 => WSRM_1_0_NS,
            RmVersion::V1_1 => WSRM_1_1_NS,
        }
    }

    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            WSRM_1_0_NS => Some(RmVersion::V1_0),
            WSRM_1_1_NS => Some(RmVersion::V1_1),
            _ => None,
        }
    }
}

/// WS-Addressing revision in use on the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingNamespace {
    /// 2004/08 member submission
    Submission,
    /// 2005/08 W3C recommendation
    Final,
}

impl AddressingNamespace {
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            WSA_SUBMISSION_NS => Some(AddressingNamespace::Submission),
            WSA_FINAL_NS => Some(AddressingNamespace::Final),
            _ => None,
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            AddressingNamespace::Submission => WSA_SUBMISSION_NS,
            AddressingNamespace::Final => WSA_FINAL_NS,
        }
    }

    /// Reserved address meaning "reply on the back-channel".
    pub fn anonymous_uri(&self) -> &'static str {
        match self {
            AddressingNamespace::Submission => WSA_SUBMISSION_ANONYMOUS_URI,
            AddressingNamespace::Final => WSA_FINAL_ANONYMOUS_URI,
        }
    }
}

/// Kind of inbound RM message, as classified by the message initializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Application,
    Acknowledgement,
    CreateSequence,
    CloseSequence,
    TerminateSequence,
    AckRequest,
}

/// Keys of the per-sequence property records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceProperty {
    /// `"true"` once the sequence has been closed; never reverts
    Closed,
    /// Declared number of the last message, when known
    LastMessageNumber,
    /// Address acknowledgements and faults are sent to
    AcksTo,
}

impl SequenceProperty {
    pub fn key(&self) -> &'static str {
        match self {
            SequenceProperty::Closed => "SequenceClosed",
            SequenceProperty::LastMessageNumber => "LastOutMessageNo",
            SequenceProperty::AcksTo => "AcksToEPR",
        }
    }
}

impl fmt::Display for SequenceProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
