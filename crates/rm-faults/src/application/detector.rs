//! Fault Detector
//!
//! Independent checks over explicit inputs and a read-only store view.
//! Each returns `Ok(Some(descriptor))` for a protocol violation, `Ok(None)`
//! when the message passes, and `Err` only when the inputs could not be read.
//! No check holds state between calls, so any number may run concurrently.

use crate::algorithms::{
    exceeded_last_message, exceeds_rollover, find_first_invalid_range, identifier_element,
    max_message_number_element, sequence_acknowledgement_element,
};
use crate::config::FaultConfig;
use crate::domain::constants::VALUE_TRUE;
use crate::domain::entities::{FaultDescriptor, FaultKind};
use crate::domain::errors::FaultError;
use crate::domain::reasons;
use crate::domain::value_objects::{
    AckBlock, MessageNumber, MessageType, RmVersion, SequenceId, SequenceProperty,
};
use crate::ports::inbound::InboundMessage;
use crate::ports::outbound::{CreateSequencePolicy, PolicyDecision, SequenceStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a single check.
pub type CheckResult = Result<Option<FaultDescriptor>, FaultError>;

/// Stateless WS-RM fault checks.
pub struct FaultDetector<S> {
    store: Arc<S>,
    policy: Arc<dyn CreateSequencePolicy>,
    config: FaultConfig,
}

impl<S: SequenceStore> FaultDetector<S> {
    pub fn new(
        store: Arc<S>,
        policy: Arc<dyn CreateSequencePolicy>,
        config: FaultConfig,
    ) -> Self {
        Self {
            store,
            policy,
            config,
        }
    }

    /// A sequence is known if we created it (outbound) or accepted it
    /// (inbound). Otherwise: `UnknownSequence` with the identifier as detail.
    pub async fn check_unknown_sequence(
        &self,
        sequence_id: &SequenceId,
        rm: RmVersion,
    ) -> CheckResult {
        debug!(%sequence_id, "checking for unknown sequence");

        let outbound = self.store.find_create_sequence_records(sequence_id).await?;
        let known = if !outbound.is_empty() {
            true
        } else {
            self.store
                .all_next_message_records()
                .await?
                .iter()
                .any(|record| &record.sequence_id == sequence_id)
        };

        if known {
            return Ok(None);
        }

        info!(%sequence_id, "sequence not established");
        Ok(Some(
            FaultDescriptor::new(
                FaultKind::UnknownSequence,
                reasons::unknown_sequence(sequence_id),
            )
            .with_detail(identifier_element(rm, sequence_id))
            .for_sequence(sequence_id.clone()),
        ))
    }

    /// Faults when a declared last message number exists and `message_number`
    /// is above it. An absent declaration never faults.
    pub async fn check_last_message_number_exceeded(
        &self,
        message_number: MessageNumber,
        sequence_id: &SequenceId,
    ) -> CheckResult {
        debug!(%sequence_id, message_number, "checking last message number");

        let declared = self
            .read_number(sequence_id, SequenceProperty::LastMessageNumber)
            .await?;
        let Some(last) = exceeded_last_message(message_number, declared) else {
            return Ok(None);
        };

        info!(
            %sequence_id,
            message_number,
            last_message_number = last,
            "last message number exceeded"
        );
        Ok(Some(
            FaultDescriptor::new(
                FaultKind::LastMessageNumberExceeded,
                reasons::last_message_number_exceeded(message_number, last),
            )
            .for_sequence(sequence_id.clone()),
        ))
    }

    /// Faults when the sequence's `closed` flag is set, whatever else is
    /// stored for it.
    pub async fn check_sequence_closed(&self, sequence_id: &SequenceId) -> CheckResult {
        debug!(%sequence_id, "checking for closed sequence");

        let closed = self
            .store
            .get_property(sequence_id, SequenceProperty::Closed)
            .await?;
        if closed.as_deref() != Some(VALUE_TRUE) {
            return Ok(None);
        }

        info!(%sequence_id, "message addressed to closed sequence");
        Ok(Some(
            FaultDescriptor::new(
                FaultKind::SequenceClosed,
                reasons::sequence_closed(sequence_id),
            )
            .for_sequence(sequence_id.clone()),
        ))
    }

    /// Scans ranges in receipt order and reports only the first one with
    /// `lower > upper`. Messages that are not acknowledgements pass.
    pub fn check_invalid_acknowledgement(
        &self,
        message_type: MessageType,
        ack_blocks: &[AckBlock],
        rm: RmVersion,
    ) -> CheckResult {
        if message_type != MessageType::Acknowledgement {
            debug!(?message_type, "not an acknowledgement, skipping range check");
            return Ok(None);
        }

        let Some(invalid) = find_first_invalid_range(ack_blocks) else {
            return Ok(None);
        };

        info!(
            sequence_id = %invalid.block.sequence_id,
            lower = invalid.range.lower,
            upper = invalid.range.upper,
            "invalid acknowledgement range"
        );
        Ok(Some(
            FaultDescriptor::new(
                FaultKind::InvalidAcknowledgement,
                reasons::invalid_acknowledgement(&invalid.range),
            )
            .with_detail(sequence_acknowledgement_element(rm, invalid.block)),
        ))
    }

    /// Faults when the message number is past the configured maximum.
    /// Disabled by `FaultConfig::detect_rollover`.
    pub fn check_message_number_rollover(
        &self,
        message_number: MessageNumber,
        sequence_id: &SequenceId,
        rm: RmVersion,
    ) -> CheckResult {
        let max = self.config.max_message_number;
        if !self.config.detect_rollover || !exceeds_rollover(message_number, max) {
            return Ok(None);
        }

        info!(%sequence_id, message_number, max, "message number rollover");
        Ok(Some(
            FaultDescriptor::new(
                FaultKind::MessageNumberRollover,
                reasons::message_number_rollover(message_number, max),
            )
            .with_detail(
                identifier_element(rm, sequence_id)
                    .with_child(max_message_number_element(rm, max)),
            )
            .for_sequence(sequence_id.clone()),
        ))
    }

    /// Asks the injected policy whether to accept a CreateSequence.
    pub fn check_create_sequence_refusal(&self, request: &dyn InboundMessage) -> CheckResult {
        if request.message_type() != MessageType::CreateSequence {
            return Err(FaultError::MissingMessagePart {
                part: "CreateSequence",
            });
        }

        match self.policy.evaluate(request) {
            PolicyDecision::Accept => Ok(None),
            PolicyDecision::Refuse { reason } => {
                info!(%reason, "create sequence refused by policy");
                Ok(Some(FaultDescriptor::new(
                    FaultKind::CreateSequenceRefused,
                    reason,
                )))
            }
        }
    }

    async fn read_number(
        &self,
        sequence_id: &SequenceId,
        property: SequenceProperty,
    ) -> Result<Option<MessageNumber>, FaultError> {
        match self.store.get_property(sequence_id, property).await? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<MessageNumber>()
                .map(Some)
                .map_err(|_| FaultError::CorruptProperty {
                    sequence_id: sequence_id.clone(),
                    key: property,
                    value: raw,
                }),
        }
    }
}
