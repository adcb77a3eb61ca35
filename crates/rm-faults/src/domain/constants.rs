//! Wire constants
//!
//! These strings are registered by the SOAP, WS-Addressing and WS-RM
//! specifications and must match them byte-for-byte.

/// SOAP 1.1 envelope namespace.
pub const SOAP11_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP 1.2 envelope namespace.
pub const SOAP12_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Prefix used for the envelope namespace in fault codes.
pub const SOAP_ENVELOPE_PREFIX: &str = "soapenv";

/// SOAP 1.1 name of the sender fault code.
pub const SOAP11_FAULT_CODE_SENDER: &str = "Client";

/// SOAP 1.2 name of the sender fault code.
pub const SOAP12_FAULT_CODE_SENDER: &str = "Sender";

/// WS-Addressing submission namespace (2004/08).
pub const WSA_SUBMISSION_NS: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";

/// Anonymous endpoint for the submission namespace.
pub const WSA_SUBMISSION_ANONYMOUS_URI: &str =
    "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

/// WS-Addressing final namespace (W3C recommendation).
pub const WSA_FINAL_NS: &str = "http://www.w3.org/2005/08/addressing";

/// Anonymous endpoint for the final namespace.
pub const WSA_FINAL_ANONYMOUS_URI: &str = "http://www.w3.org/2005/08/addressing/anonymous";

/// WS-RM 1.0 (February 2005) namespace.
pub const WSRM_1_0_NS: &str = "http://schemas.xmlsoap.org/ws/2005/02/rm";

/// WS-RM 1.1 (OASIS, February 2007) namespace.
pub const WSRM_1_1_NS: &str = "http://docs.oasis-open.org/ws-rx/wsrm/200702";

/// Prefix bound to the WS-RM namespace.
pub const WSRM_PREFIX: &str = "wsrm";

/// Fault subcodes.
pub mod subcodes {
    pub const CREATE_SEQUENCE_REFUSED: &str = "wsrm:CreateSequenceRefused";
    pub const LAST_MESSAGE_NUMBER_EXCEEDED: &str = "wsrm:LastMessageNumberExceeded";
    pub const UNKNOWN_SEQUENCE: &str = "wsrm:UnknownSequence";
    pub const INVALID_ACKNOWLEDGEMENT: &str = "wsrm:InvalidAcknowledgement";
    pub const SEQUENCE_CLOSED: &str = "wsrm:SequenceClosed";
    pub const MESSAGE_NUMBER_ROLLOVER: &str = "wsrm:MessageNumberRollover";
}

/// Local names of WS-RM elements used in fault details.
pub mod elements {
    pub const IDENTIFIER: &str = "Identifier";
    pub const SEQUENCE_ACKNOWLEDGEMENT: &str = "SequenceAcknowledgement";
    pub const ACKNOWLEDGEMENT_RANGE: &str = "AcknowledgementRange";
    pub const MAX_MESSAGE_NUMBER: &str = "MaxMessageNumber";
    pub const UPPER: &str = "Upper";
    pub const LOWER: &str = "Lower";
}

/// Largest message number WS-RM allows (xs:long maximum).
pub const MAX_MESSAGE_NUMBER: u64 = 9_223_372_036_854_775_807;

/// Stored value of the `closed` property once a sequence is closed.
pub const VALUE_TRUE: &str = "true";
