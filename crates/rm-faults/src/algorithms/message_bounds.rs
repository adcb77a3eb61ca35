//! Message number bound predicates

use crate::domain::value_objects::MessageNumber;

/// The declared last message number, when one exists and `message_number`
/// is past it.
///
/// An absent bound never faults; it is not treated as zero.
pub fn exceeded_last_message(
    message_number: MessageNumber,
    last_message_number: Option<MessageNumber>,
) -> Option<MessageNumber> {
    last_message_number.filter(|&last| message_number > last)
}

/// True when the number is past the largest number a sequence may carry.
pub fn exceeds_rollover(message_number: MessageNumber, max_message_number: MessageNumber) -> bool {
    message_number > max_message_number
}
