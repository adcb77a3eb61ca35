//! Human-readable fault reasons

use super::value_objects::{AckRange, MessageNumber, SequenceId};

pub fn unknown_sequence(sequence_id: &SequenceId) -> String {
    format!(
        "A sequence with the identifier {} has not been established, has already been terminated or is unknown",
        sequence_id
    )
}

pub fn last_message_number_exceeded(
    message_number: MessageNumber,
    last_message_number: MessageNumber,
) -> String {
    format!(
        "The message number {} is larger than the last message number {} declared for this sequence",
        message_number, last_message_number
    )
}

pub fn sequence_closed(sequence_id: &SequenceId) -> String {
    format!(
        "Cannot accept the message because the sequence {} has been closed",
        sequence_id
    )
}

pub fn invalid_acknowledgement(range: &AckRange) -> String {
    format!(
        "The acknowledgement is invalid: lower value {} is larger than upper value {}",
        range.lower, range.upper
    )
}

pub fn message_number_rollover(
    message_number: MessageNumber,
    max_message_number: MessageNumber,
) -> String {
    format!(
        "The message number {} exceeds the maximum message number {}",
        message_number, max_message_number
    )
}
