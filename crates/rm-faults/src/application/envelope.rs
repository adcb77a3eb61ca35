//! Fault Envelope Builder
//!
//! Turns a `FaultDescriptor` into an addressed, version-correct fault
//! message:
//!
//! 1. Pick the SOAP sender code for the envelope version
//! 2. Copy subcode and reason verbatim
//! 3. Attach the detail element, dropping it (never the fault) if it
//!    cannot be rendered
//! 4. Resolve the destination from AcksTo; the anonymous URI means the
//!    back-channel of the triggering exchange
//! 5. Mark the exchange out-only

use crate::config::FaultConfig;
use crate::domain::constants::SOAP_ENVELOPE_PREFIX;
use crate::domain::entities::{DetailElement, FaultCode, FaultDescriptor, FaultKind};
use crate::domain::errors::FaultError;
use crate::domain::value_objects::{
    AddressingNamespace, EndpointUri, MessageType, ProtocolVersion, SequenceId, SequenceProperty,
};
use crate::metrics::MetricsRecorder;
use crate::ports::inbound::InboundMessage;
use crate::ports::outbound::SequenceStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Concrete SOAP fault code for one envelope version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoapFaultCode {
    pub namespace: &'static str,
    pub local_name: &'static str,
}

impl SoapFaultCode {
    pub fn for_code(version: ProtocolVersion, code: FaultCode) -> Self {
        match code {
            FaultCode::Sender => Self {
                namespace: version.envelope_namespace(),
                local_name: version.sender_code_name(),
            },
        }
    }

    /// `soapenv:Client` / `soapenv:Sender`
    pub fn prefixed_name(&self) -> String {
        format!("{}:{}", SOAP_ENVELOPE_PREFIX, self.local_name)
    }
}

/// Where the fault is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Reply on the transport back-channel of the triggering exchange
    BackChannel,
    /// New outbound message to this address
    Endpoint(EndpointUri),
}

/// Message exchange pattern of the fault message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangePattern {
    OutOnly,
}

impl ExchangePattern {
    pub fn uri(&self) -> &'static str {
        match self {
            ExchangePattern::OutOnly => "http://www.w3.org/2004/08/wsdl/out-only",
        }
    }
}

/// Fully addressed fault message, ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultMessage {
    kind: FaultKind,
    protocol_version: ProtocolVersion,
    code: SoapFaultCode,
    subcode: String,
    reason: String,
    detail: Option<DetailElement>,
    sequence_id: Option<SequenceId>,
    destination: Destination,
    exchange_pattern: ExchangePattern,
    relates_to: Option<String>,
    rm_namespace: String,
}

impl FaultMessage {
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn code(&self) -> SoapFaultCode {
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

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn is_back_channel(&self) -> bool {
        self.destination == Destination::BackChannel
    }

    pub fn exchange_pattern(&self) -> ExchangePattern {
        self.exchange_pattern
    }

    /// Message id of the triggering message.
    pub fn relates_to(&self) -> Option<&str> {
        self.relates_to.as_deref()
    }

    pub fn rm_namespace(&self) -> &str {
        &self.rm_namespace
    }

    /// Recover the descriptor fields carried by this message.
    pub fn to_descriptor(&self) -> FaultDescriptor {
        let descriptor = FaultDescriptor::new(self.kind, self.reason.clone());
        let descriptor = match &self.detail {
            Some(detail) => descriptor.with_detail(detail.clone()),
            None => descriptor,
        };
        match &self.sequence_id {
            Some(id) => descriptor.for_sequence(id.clone()),
            None => descriptor,
        }
    }
}

/// Builds fault messages from descriptors.
pub struct FaultEnvelopeBuilder<S> {
    store: Arc<S>,
    config: FaultConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: SequenceStore> FaultEnvelopeBuilder<S> {
    pub fn new(store: Arc<S>, config: FaultConfig, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    /// Build the fault message for `descriptor`.
    ///
    /// `inbound` is only read: its type decides where AcksTo comes from and
    /// its message id becomes `relates_to`.
    pub async fn build(
        &self,
        descriptor: &FaultDescriptor,
        version: ProtocolVersion,
        addressing_namespace: &str,
        inbound: &dyn InboundMessage,
    ) -> Result<FaultMessage, FaultError> {
        let addressing = AddressingNamespace::from_uri(addressing_namespace).ok_or_else(|| {
            FaultError::UnknownAddressingNamespace(addressing_namespace.to_string())
        })?;

        let code = SoapFaultCode::for_code(version, descriptor.code());
        let detail = self.attach_detail(descriptor);
        let destination = self.resolve_destination(descriptor, addressing, inbound).await?;

        debug!(
            kind = %descriptor.kind(),
            code = %code.prefixed_name(),
            subcode = descriptor.subcode(),
            ?destination,
            has_detail = detail.is_some(),
            "built fault message"
        );

        Ok(FaultMessage {
            kind: descriptor.kind(),
            protocol_version: version,
            code,
            subcode: descriptor.subcode().to_string(),
            reason: descriptor.reason().to_string(),
            detail,
            sequence_id: descriptor.sequence_id().cloned(),
            destination,
            exchange_pattern: ExchangePattern::OutOnly,
            relates_to: inbound.message_id().map(str::to_string),
            rm_namespace: inbound.rm_namespace().to_string(),
        })
    }

    fn attach_detail(&self, descriptor: &FaultDescriptor) -> Option<DetailElement> {
        // mandatory detail survives the switch
        if !self.config.attach_detail && !descriptor.kind().requires_detail() {
            return None;
        }
        let detail = descriptor.detail()?;
        match detail.to_xml() {
            Ok(_) => Some(detail.clone()),
            Err(e) => {
                warn!(
                    kind = %descriptor.kind(),
                    error = %e,
                    "dropping fault detail that cannot be serialized"
                );
                self.metrics.record_detail_dropped(descriptor.kind());
                None
            }
        }
    }

    async fn resolve_destination(
        &self,
        descriptor: &FaultDescriptor,
        addressing: AddressingNamespace,
        inbound: &dyn InboundMessage,
    ) -> Result<Destination, FaultError> {
        let acks_to = if inbound.message_type() == MessageType::CreateSequence {
            Some(
                inbound
                    .acks_to()
                    .ok_or(FaultError::MissingMessagePart { part: "AcksTo" })?
                    .clone(),
            )
        } else if let Some(sequence_id) = descriptor.sequence_id() {
            self.store
                .get_property(sequence_id, SequenceProperty::AcksTo)
                .await?
        } else {
            None
        };

        Ok(match acks_to {
            Some(uri) if uri != addressing.anonymous_uri() => Destination::Endpoint(uri),
            _ => Destination::BackChannel,
        })
    }
}
