//! Fault Management Service
//!
//! Runs the detector checks for each message class in priority order and
//! turns the first violation into an addressed fault message.

use crate::adapters::AcceptAllPolicy;
use crate::application::detector::{CheckResult, FaultDetector};
use crate::application::envelope::{FaultEnvelopeBuilder, FaultMessage};
use crate::config::FaultConfig;
use crate::domain::errors::FaultError;
use crate::domain::value_objects::{MessageType, RmVersion};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::inbound::{FaultManagementApi, InboundMessage};
use crate::ports::outbound::{CreateSequencePolicy, SequenceStore};
use crate::SUBSYSTEM;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument, Span};

/// Fault management entry point.
pub struct FaultManagementService<S> {
    detector: FaultDetector<S>,
    envelope_builder: FaultEnvelopeBuilder<S>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: SequenceStore> FaultManagementService<S> {
    /// Service with the default config, `AcceptAllPolicy` and no metrics.
    pub fn new(store: Arc<S>) -> Self {
        Self::assemble(
            store,
            FaultConfig::default(),
            Arc::new(AcceptAllPolicy),
            Arc::new(NoOpMetrics),
        )
    }

    pub fn builder(store: Arc<S>) -> FaultManagementServiceBuilder<S> {
        FaultManagementServiceBuilder {
            store,
            config: FaultConfig::default(),
            policy: Arc::new(AcceptAllPolicy),
            metrics: Arc::new(NoOpMetrics),
        }
    }

    fn assemble(
        store: Arc<S>,
        config: FaultConfig,
        policy: Arc<dyn CreateSequencePolicy>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            detector: FaultDetector::new(Arc::clone(&store), policy, config.clone()),
            envelope_builder: FaultEnvelopeBuilder::new(store, config, Arc::clone(&metrics)),
            metrics,
        }
    }

    pub fn detector(&self) -> &FaultDetector<S> {
        &self.detector
    }

    pub fn envelope_builder(&self) -> &FaultEnvelopeBuilder<S> {
        &self.envelope_builder
    }

    async fn run_application_checks(&self, message: &dyn InboundMessage) -> CheckResult {
        let (Some(sequence_id), Some(message_number)) =
            (message.sequence_id(), message.message_number())
        else {
            return Err(FaultError::MissingMessagePart { part: "Sequence" });
        };
        let rm = rm_version(message)?;

        if let Some(fault) = self.detector.check_unknown_sequence(sequence_id, rm).await? {
            return Ok(Some(fault));
        }
        if let Some(fault) = self.detector.check_sequence_closed(sequence_id).await? {
            return Ok(Some(fault));
        }
        if let Some(fault) = self
            .detector
            .check_last_message_number_exceeded(message_number, sequence_id)
            .await?
        {
            return Ok(Some(fault));
        }
        self.detector
            .check_message_number_rollover(message_number, sequence_id, rm)
    }

    /// Build the envelope for a detected fault, counting infrastructure
    /// failures on either side.
    async fn emit(
        &self,
        check: CheckResult,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError> {
        let descriptor = match check {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => return Ok(None),
            Err(e) => return Err(self.infrastructure_error(e)),
        };

        let fault = self
            .envelope_builder
            .build(
                &descriptor,
                message.protocol_version(),
                message.addressing_namespace(),
                message,
            )
            .await
            .map_err(|e| self.infrastructure_error(e))?;

        self.metrics.record_fault(fault.kind());
        Ok(Some(fault))
    }

    fn infrastructure_error(&self, error: FaultError) -> FaultError {
        warn!(error = %error, "fault check could not complete");
        self.metrics.record_infrastructure_error();
        error
    }
}

/// Span for one entry point call; events inside inherit `subsystem`.
fn check_span(operation: &'static str, message: &dyn InboundMessage) -> Span {
    info_span!(
        "fault_check",
        subsystem = SUBSYSTEM,
        operation,
        message_type = ?message.message_type()
    )
}

fn rm_version(message: &dyn InboundMessage) -> Result<RmVersion, FaultError> {
    RmVersion::from_namespace(message.rm_namespace())
        .ok_or_else(|| FaultError::UnknownRmNamespace(message.rm_namespace().to_string()))
}

#[async_trait]
impl<S: SequenceStore> FaultManagementApi for FaultManagementService<S> {
    async fn check_application_message(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError> {
        async move {
            let check = self.run_application_checks(message).await;
            self.emit(check, message).await
        }
        .instrument(check_span("application_message", message))
        .await
    }

    async fn check_acknowledgement(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError> {
        async move {
            if message.message_type() != MessageType::Acknowledgement {
                debug!("no acknowledgement checks apply");
                return Ok(None);
            }
            let check = rm_version(message).and_then(|rm| {
                self.detector.check_invalid_acknowledgement(
                    message.message_type(),
                    message.ack_blocks(),
                    rm,
                )
            });
            self.emit(check, message).await
        }
        .instrument(check_span("acknowledgement", message))
        .await
    }

    async fn check_create_sequence(
        &self,
        message: &dyn InboundMessage,
    ) -> Result<Option<FaultMessage>, FaultError> {
        async move {
            let check = self.detector.check_create_sequence_refusal(message);
            self.emit(check, message).await
        }
        .instrument(check_span("create_sequence", message))
        .await
    }
}

/// Builder for [`FaultManagementService`].
pub struct FaultManagementServiceBuilder<S> {
    store: Arc<S>,
    config: FaultConfig,
    policy: Arc<dyn CreateSequencePolicy>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: SequenceStore> FaultManagementServiceBuilder<S> {
    pub fn config(mut self, config: FaultConfig) -> Self {
        self.config = config;
        self
    }

    pub fn policy(mut self, policy: Arc<dyn CreateSequencePolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validates the config and assembles the service.
    pub fn build(self) -> Result<FaultManagementService<S>, FaultError> {
        self.config.validate()?;
        Ok(FaultManagementService::assemble(
            self.store,
            self.config,
            self.policy,
            self.metrics,
        ))
    }
}
