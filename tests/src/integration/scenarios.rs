//! # End-to-End Fault Checks
//!
//! Detector checks and built fault messages, run through the public API
//! against a seeded in-memory store.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        Scoped, ServiceFixture, CLOSED_SEQUENCE, INBOUND_SEQUENCE, OUTBOUND_SEQUENCE,
        PEER_ACKS_TO,
    };
    use rm_faults::domain::constants::{
        WSA_FINAL_NS, WSA_SUBMISSION_ANONYMOUS_URI, WSA_SUBMISSION_NS,
    };
    use rm_faults::{
        AckBlock, AckRange, Destination, FaultKind, FaultManagementApi, MessageType,
        ProtocolVersion, RmMessage, RmVersion, SequenceId,
    };

    fn fixture() -> Scoped<ServiceFixture> {
        Scoped::new(ServiceFixture::standard().unwrap())
    }

    // =============================================================================
    // UNKNOWN SEQUENCE
    // =============================================================================

    #[tokio::test]
    async fn test_unregistered_sequence_is_unknown() {
        let fx = fixture();
        let detector = fx.service.detector();

        for message_number in [1, 2, 1_000] {
            let fault = detector
                .check_unknown_sequence(&SequenceId::from("seq-1"), RmVersion::V1_0)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(fault.kind(), FaultKind::UnknownSequence);
            assert_eq!(fault.subcode(), "wsrm:UnknownSequence");

            let message = RmMessage::application("seq-1", message_number);
            let built = fx
                .service
                .check_application_message(&message)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(built.kind(), FaultKind::UnknownSequence);
            let identifier = built.detail().unwrap();
            assert_eq!(identifier.local_name, "Identifier");
            assert_eq!(identifier.text.as_deref(), Some("seq-1"));
        }
    }

    #[tokio::test]
    async fn test_known_sequences_are_not_unknown() {
        let fx = fixture();
        let detector = fx.service.detector();

        for id in [OUTBOUND_SEQUENCE, INBOUND_SEQUENCE, CLOSED_SEQUENCE] {
            let result = detector
                .check_unknown_sequence(&SequenceId::from(id), RmVersion::V1_0)
                .await
                .unwrap();
            assert!(result.is_none(), "{id} should be known");
        }
    }

    // =============================================================================
    // INVALID ACKNOWLEDGEMENT
    // =============================================================================

    #[tokio::test]
    async fn test_inverted_ack_range_reports_offending_block() {
        let fx = fixture();
        let blocks = vec![AckBlock::new(INBOUND_SEQUENCE, vec![AckRange::new(10, 5)])];

        let fault = fx
            .service
            .detector()
            .check_invalid_acknowledgement(MessageType::Acknowledgement, &blocks, RmVersion::V1_0)
            .unwrap()
            .unwrap();
        assert_eq!(fault.kind(), FaultKind::InvalidAcknowledgement);
        assert!(fault.reason().contains("10"));
        assert!(fault.reason().contains('5'));

        let built = fx
            .service
            .check_acknowledgement(&RmMessage::acknowledgement(blocks))
            .await
            .unwrap()
            .unwrap();
        let ack = built.detail().unwrap();
        assert_eq!(ack.local_name, "SequenceAcknowledgement");
        let range = ack.find_child("AcknowledgementRange").unwrap();
        assert_eq!(range.attribute("Lower"), Some("10"));
        assert_eq!(range.attribute("Upper"), Some("5"));
    }

    // =============================================================================
    // CLOSED SEQUENCE
    // =============================================================================

    #[tokio::test]
    async fn test_closed_check_ignores_missing_last_message_number() {
        let fx = fixture();
        let detector = fx.service.detector();
        let closed = SequenceId::from(CLOSED_SEQUENCE);

        let fault = detector.check_sequence_closed(&closed).await.unwrap().unwrap();
        assert_eq!(fault.kind(), FaultKind::SequenceClosed);

        let last = detector
            .check_last_message_number_exceeded(3, &closed)
            .await
            .unwrap();
        assert!(last.is_none());
    }

    // =============================================================================
    // ACKS-TO ROUTING
    // =============================================================================

    #[tokio::test]
    async fn test_anonymous_acks_to_routes_to_back_channel() {
        let fx = fixture();
        let ghost = SequenceId::from("urn:uuid:ghost");
        fx.state
            .store
            .set_acks_to(&ghost, WSA_SUBMISSION_ANONYMOUS_URI);

        let descriptor = fx
            .service
            .detector()
            .check_unknown_sequence(&ghost, RmVersion::V1_0)
            .await
            .unwrap()
            .unwrap();
        let message = RmMessage::application(ghost.clone(), 1)
            .with_addressing_namespace(WSA_SUBMISSION_NS);

        let built = fx
            .service
            .envelope_builder()
            .build(&descriptor, ProtocolVersion::V1_1, WSA_SUBMISSION_NS, &message)
            .await
            .unwrap();

        assert_eq!(built.destination(), &Destination::BackChannel);
        assert_eq!(built.code().prefixed_name(), "soapenv:Client");
    }

    #[tokio::test]
    async fn test_addressed_acks_to_gets_new_message() {
        let fx = fixture();
        let message = RmMessage::application(OUTBOUND_SEQUENCE, 1)
            .with_message_id("urn:uuid:msg-7");

        // outbound sequences are known, so force a fault via the closed flag
        fx.state
            .store
            .close_sequence(&SequenceId::from(OUTBOUND_SEQUENCE));
        let built = fx
            .service
            .check_application_message(&message)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(built.kind(), FaultKind::SequenceClosed);
        assert_eq!(
            built.destination(),
            &Destination::Endpoint(PEER_ACKS_TO.to_string())
        );
        assert_eq!(built.relates_to(), Some("urn:uuid:msg-7"));
    }

    // =============================================================================
    // ROUND-TRIP
    // =============================================================================

    #[tokio::test]
    async fn test_round_trip_for_every_detected_kind() {
        let fx = fixture();
        let detector = fx.service.detector();
        let builder = fx.service.envelope_builder();
        let message = RmMessage::application("seq-rt", 1);

        let descriptors = vec![
            detector
                .check_unknown_sequence(&SequenceId::from("seq-rt"), RmVersion::V1_1)
                .await
                .unwrap()
                .unwrap(),
            detector
                .check_invalid_acknowledgement(
                    MessageType::Acknowledgement,
                    &[AckBlock::new("seq-rt", vec![AckRange::new(9, 2)])],
                    RmVersion::V1_1,
                )
                .unwrap()
                .unwrap(),
            detector
                .check_message_number_rollover(u64::MAX, &SequenceId::from("seq-rt"), RmVersion::V1_1)
                .unwrap()
                .unwrap(),
        ];

        for version in [ProtocolVersion::V1_1, ProtocolVersion::V1_2] {
            for descriptor in &descriptors {
                let built = builder
                    .build(descriptor, version, WSA_FINAL_NS, &message)
                    .await
                    .unwrap();
                assert_eq!(built.code().namespace, version.envelope_namespace());
                assert_eq!(built.subcode(), descriptor.subcode());
                assert_eq!(built.reason(), descriptor.reason());
                assert_eq!(built.detail(), descriptor.detail());
                assert_eq!(&built.to_descriptor(), descriptor);
            }
        }
    }
}
