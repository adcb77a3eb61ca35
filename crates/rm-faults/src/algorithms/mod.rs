//! Pure fault predicates and detail builders
//!
//! Nothing here touches the sequence store; the detector feeds these
//! functions with values it has already read.

pub mod ack_validation;
pub mod detail;
pub mod message_bounds;

pub use ack_validation::{find_first_invalid_range, InvalidRange};
pub use detail::{identifier_element, max_message_number_element, sequence_acknowledgement_element};
pub use message_bounds::{exceeded_last_message, exceeds_rollover};
