//! # Telemetry Wiring
//!
//! `PrometheusRecorder` plugged into the service exports fault counters,
//! and every entry point runs inside a span tagged with the subsystem.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Scoped, StoreFixture};
    use rm_faults::{
        AckBlock, AckRange, FaultKind, FaultManagementApi, FaultManagementService, RmMessage,
    };
    use rm_telemetry::metrics::FAULTS_EMITTED;
    use rm_telemetry::{gather_text, PrometheusRecorder, TelemetryConfig};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records `(subsystem, operation)` for every new span.
    #[derive(Clone, Default)]
    struct SpanFields(Arc<Mutex<Vec<(String, String)>>>);

    #[derive(Default)]
    struct FieldVisitor {
        subsystem: String,
        operation: String,
    }

    impl Visit for FieldVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            match field.name() {
                "subsystem" => self.subsystem = value.to_string(),
                "operation" => self.operation = value.to_string(),
                _ => {}
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
    }

    impl<S: Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            attrs.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((visitor.subsystem, visitor.operation));
        }
    }

    #[tokio::test]
    async fn test_prometheus_recorder_counts_emitted_faults() {
        let state = Scoped::new(StoreFixture::default());
        let service = FaultManagementService::builder(Arc::clone(&state.store))
            .metrics(Arc::new(PrometheusRecorder::new().unwrap()))
            .build()
            .unwrap();
        let label = [FaultKind::InvalidAcknowledgement.as_str()];
        let before = FAULTS_EMITTED.with_label_values(&label).get();

        let message = RmMessage::acknowledgement(vec![AckBlock::new(
            "urn:uuid:any",
            vec![AckRange::new(7, 3)],
        )]);
        service.check_acknowledgement(&message).await.unwrap();

        assert_eq!(FAULTS_EMITTED.with_label_values(&label).get(), before + 1);
        let text = gather_text().unwrap();
        assert!(text.contains("rm_faults_emitted_total"));
        assert!(text.contains("kind=\"invalid_acknowledgement\""));
    }

    #[test]
    fn test_config_lookup_feeds_filter() {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "RM_LOG_LEVEL" => Some("rm_faults=debug".to_string()),
            _ => None,
        });
        assert!(rm_telemetry::build_filter(&config).is_ok());
    }

    #[test]
    fn test_entry_points_run_in_subsystem_span() {
        let spans = SpanFields::default();
        let subscriber = tracing_subscriber::registry().with(spans.clone());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let state = Scoped::new(StoreFixture::default());
        let service = FaultManagementService::new(Arc::clone(&state.store));

        tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(async {
                service
                    .check_application_message(&RmMessage::application("seq-1", 1))
                    .await
                    .unwrap();
                service
                    .check_acknowledgement(&RmMessage::acknowledgement(vec![]))
                    .await
                    .unwrap();
                service
                    .check_create_sequence(&RmMessage::create_sequence(
                        "http://client.example/acks",
                    ))
                    .await
                    .unwrap();
            })
        });

        let recorded = spans.0.lock().unwrap().clone();
        let operations: Vec<&str> = recorded
            .iter()
            .filter(|(subsystem, _)| subsystem == rm_telemetry::logging::SUBSYSTEM)
            .map(|(_, operation)| operation.as_str())
            .collect();
        assert_eq!(
            operations,
            ["application_message", "acknowledgement", "create_sequence"]
        );
    }
}
