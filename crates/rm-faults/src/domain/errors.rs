//! Error types for fault management
//!
//! Protocol faults are not errors: a detected violation is returned as a
//! `FaultDescriptor` inside `Ok`. The types here cover infrastructure
//! failures only, i.e. anything that prevents a check from being evaluated.

use super::value_objects::{SequenceId, SequenceProperty};
use thiserror::Error;

/// Infrastructure errors raised while evaluating a check or building a fault.
#[derive(Debug, Error)]
pub enum FaultError {
    /// Sequence store could not be read
    #[error("Sequence store error: {0}")]
    Store(#[from] StoreError),

    /// Inbound message lacks a part the check depends on
    #[error("Inbound message is missing the {part} part")]
    MissingMessagePart { part: &'static str },

    /// A stored property exists but cannot be interpreted
    #[error("Corrupt property {key} for sequence {sequence_id}: {value:?}")]
    CorruptProperty {
        sequence_id: SequenceId,
        key: SequenceProperty,
        value: String,
    },

    /// WS-Addressing namespace is not one we know the anonymous URI for
    #[error("Unknown WS-Addressing namespace: {0}")]
    UnknownAddressingNamespace(String),

    /// WS-RM namespace is not a supported revision
    #[error("Unknown WS-RM namespace: {0}")]
    UnknownRmNamespace(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from the sequence store port.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Query error: {0}")]
    QueryError(String),
}

/// Errors raised while rendering a fault detail element.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("Invalid XML name: {0:?}")]
    InvalidName(String),

    #[error("Invalid namespace prefix: {0:?}")]
    InvalidPrefix(String),

    #[error("Character not allowed in XML: U+{:04X}", u32::from(*.0))]
    InvalidCharacter(char),
}
