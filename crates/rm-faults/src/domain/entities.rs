//! Domain entities for fault management
//!
//! - `FaultKind` / `FaultCode`: the WS-RM fault taxonomy
//! - `DetailElement`: owned XML element carried as fault detail
//! - `FaultDescriptor`: immutable description of one detected fault
//! - `CreateSequenceRecord` / `NextMessageRecord`: existence markers read
//!   from the sequence store

use super::constants::subcodes;
use super::errors::DetailError;
use super::value_objects::{MessageNumber, SequenceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WS-RM fault kinds this subsystem can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    CreateSequenceRefused,
    LastMessageNumberExceeded,
    UnknownSequence,
    InvalidAcknowledgement,
    SequenceClosed,
    MessageNumberRollover,
}

impl FaultKind {
    /// All kinds, in declaration order.
    pub const ALL: [FaultKind; 6] = [
        FaultKind::CreateSequenceRefused,
        FaultKind::LastMessageNumberExceeded,
        FaultKind::UnknownSequence,
        FaultKind::InvalidAcknowledgement,
        FaultKind::SequenceClosed,
        FaultKind::MessageNumberRollover,
    ];

    /// Registered subcode for this kind.
    pub fn subcode(&self) -> &'static str {
        match self {
            FaultKind::CreateSequenceRefused => subcodes::CREATE_SEQUENCE_REFUSED,
            FaultKind::LastMessageNumberExceeded => subcodes::LAST_MESSAGE_NUMBER_EXCEEDED,
            FaultKind::UnknownSequence => subcodes::UNKNOWN_SEQUENCE,
            FaultKind::InvalidAcknowledgement => subcodes::INVALID_ACKNOWLEDGEMENT,
            FaultKind::SequenceClosed => subcodes::SEQUENCE_CLOSED,
            FaultKind::MessageNumberRollover => subcodes::MESSAGE_NUMBER_ROLLOVER,
        }
    }

    /// SOAP fault class. Every WS-RM fault raised here blames the sender.
    pub fn code(&self) -> FaultCode {
        FaultCode::Sender
    }

    /// Whether the protocol mandates a detail element for this kind.
    pub fn requires_detail(&self) -> bool {
        matches!(
            self,
            FaultKind::UnknownSequence
                | FaultKind::InvalidAcknowledgement
                | FaultKind::MessageNumberRollover
        )
    }

    /// Short label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::CreateSequenceRefused => "create_sequence_refused",
            FaultKind::LastMessageNumberExceeded => "last_message_number_exceeded",
            FaultKind::UnknownSequence => "unknown_sequence",
            FaultKind::InvalidAcknowledgement => "invalid_acknowledgement",
            FaultKind::SequenceClosed => "sequence_closed",
            FaultKind::MessageNumberRollover => "message_number_rollover",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version-independent SOAP fault class.
///
/// The envelope builder maps this to the concrete code of the SOAP version
/// in use (`Client` for 1.1, `Sender` for 1.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultCode {
    Sender,
}

/// An XML element carried verbatim as fault detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailElement {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<DetailElement>,
}

impl DetailElement {
    /// Unqualified element.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Namespace-qualified element.
    pub fn qualified(
        namespace: impl Into<String>,
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            prefix: Some(prefix.into()),
            ..Self::new(local_name)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: DetailElement) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child with the given local name.
    pub fn find_child(&self, local_name: &str) -> Option<&DetailElement> {
        self.children.iter().find(|c| c.local_name == local_name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render as an XML fragment.
    ///
    /// Fails when an element, attribute or prefix is not a valid XML name, or
    /// when text or an attribute value holds a character XML 1.0 forbids.
    pub fn to_xml(&self) -> Result<String, DetailError> {
        let mut out = String::new();
        self.write_xml(&mut out, None)?;
        Ok(out)
    }

    fn write_xml(
        &self,
        out: &mut String,
        in_scope: Option<(&str, &str)>,
    ) -> Result<(), DetailError> {
        validate_name(&self.local_name)?;

        let qname = match &self.prefix {
            Some(prefix) => {
                if !is_xml_name(prefix) {
                    return Err(DetailError::InvalidPrefix(prefix.clone()));
                }
                format!("{}:{}", prefix, self.local_name)
            }
            None => self.local_name.clone(),
        };

        out.push('<');
        out.push_str(&qname);

        let binding = match (&self.prefix, &self.namespace) {
            (Some(p), Some(ns)) => Some((p.as_str(), ns.as_str())),
            _ => None,
        };
        if let Some((p, ns)) = binding {
            if in_scope != binding {
                out.push_str(&format!(" xmlns:{}=\"{}\"", p, escape(ns)?));
            }
        }

        for (name, value) in &self.attributes {
            validate_name(name)?;
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)?));
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text)?);
        }
        let scope = binding.or(in_scope);
        for child in &self.children {
            child.write_xml(out, scope)?;
        }
        out.push_str("</");
        out.push_str(&qname);
        out.push('>');
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DetailError> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(DetailError::InvalidName(name.to_string()))
    }
}

/// NCName subset: ASCII letter or `_` first, then letters, digits, `-`, `_`, `.`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Tab, LF and CR are the only control characters XML 1.0 admits.
fn is_forbidden_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn escape(raw: &str) -> Result<String, DetailError> {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            c if is_forbidden_char(c) => return Err(DetailError::InvalidCharacter(c)),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Ok(escaped)
}

/// Immutable description of a detected protocol fault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultDescriptor {
    kind: FaultKind,
    code: FaultCode,
    subcode: String,
    reason: String,
    detail: Option<DetailElement>,
    sequence_id: Option<SequenceId>,
}

impl FaultDescriptor {
    /// Descriptor with the kind's code and subcode and no detail.
    pub fn new(kind: FaultKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code(),
            subcode: kind.subcode().to_string(),
            reason: reason.into(),
            detail: None,
            sequence_id: None,
        }
    }

    pub fn with_detail(mut self, detail: DetailElement) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn for_sequence(mut self, sequence_id: SequenceId) -> Self {
        self.sequence_id = Some(sequence_id);
        self
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn code(&self) -> FaultCode {
        self.code
    }

    pub fn subcode(&self) -> &str {
        &self.subcode
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn detail(&self) -> Option<&DetailElement> {
        self.detail.as_ref()
    }

    pub fn sequence_id(&self) -> Option<&SequenceId> {
        self.sequence_id.as_ref()
    }
}

/// Outbound-side record: a CreateSequence we sent and got a sequence for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSequenceRecord {
    pub internal_sequence_id: String,
    pub sequence_id: SequenceId,
    pub create_sequence_message_id: String,
}

/// Inbound-side record: the next message number expected on a sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMessageRecord {
    pub sequence_id: SequenceId,
    pub next_message_number: MessageNumber,
}
