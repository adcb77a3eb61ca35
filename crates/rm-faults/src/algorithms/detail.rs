//! Fault detail builders
//!
//! Produce the WS-RM elements that travel in the SOAP fault detail,
//! qualified with the namespace of the triggering message.

use crate::domain::constants::{elements, WSRM_PREFIX};
use crate::domain::entities::DetailElement;
use crate::domain::value_objects::{AckBlock, MessageNumber, RmVersion, SequenceId};

fn rm_element(rm: RmVersion, local_name: &str) -> DetailElement {
    DetailElement::qualified(rm.namespace(), WSRM_PREFIX, local_name)
}

/// `<wsrm:Identifier>id</wsrm:Identifier>`
pub fn identifier_element(rm: RmVersion, sequence_id: &SequenceId) -> DetailElement {
    rm_element(rm, elements::IDENTIFIER).with_text(sequence_id.as_str())
}

/// Full `SequenceAcknowledgement` element for an acknowledgement block.
pub fn sequence_acknowledgement_element(rm: RmVersion, block: &AckBlock) -> DetailElement {
    block.ranges.iter().fold(
        rm_element(rm, elements::SEQUENCE_ACKNOWLEDGEMENT)
            .with_child(identifier_element(rm, &block.sequence_id)),
        |ack, range| {
            ack.with_child(
                rm_element(rm, elements::ACKNOWLEDGEMENT_RANGE)
                    .with_attribute(elements::UPPER, range.upper.to_string())
                    .with_attribute(elements::LOWER, range.lower.to_string()),
            )
        },
    )
}

/// `<wsrm:MaxMessageNumber>n</wsrm:MaxMessageNumber>`
pub fn max_message_number_element(rm: RmVersion, max: MessageNumber) -> DetailElement {
    rm_element(rm, elements::MAX_MESSAGE_NUMBER).with_text(max.to_string())
}
