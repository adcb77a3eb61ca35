//! # Concurrent Checks
//!
//! Checks hold no state between calls; many may run at once against the
//! same store while it is being updated.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Scoped, ServiceFixture, INBOUND_SEQUENCE};
    use futures::future::join_all;
    use rm_faults::{FaultKind, FaultManagementApi, RmMessage, SequenceId};
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_checks_are_independent() {
        let fx = Arc::new(Scoped::new(ServiceFixture::standard().unwrap()));

        let tasks = (0..64u64).map(|i| {
            let fx = Arc::clone(&fx);
            tokio::spawn(async move {
                let id = if i % 2 == 0 {
                    INBOUND_SEQUENCE.to_string()
                } else {
                    format!("urn:uuid:unknown-{i}")
                };
                fx.service
                    .check_application_message(&RmMessage::application(id, i + 1))
                    .await
                    .map(|fault| fault.map(|f| f.kind()))
            })
        });

        let results = join_all(tasks).await;
        for (i, result) in results.into_iter().enumerate() {
            let kind = result.unwrap().unwrap();
            if i % 2 == 0 {
                assert_eq!(kind, None);
            } else {
                assert_eq!(kind, Some(FaultKind::UnknownSequence));
            }
        }
        assert_eq!(fx.metrics.snapshot().unknown_sequence, 32);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_checks_observe_concurrent_close() {
        let fx = Arc::new(Scoped::new(ServiceFixture::standard().unwrap()));
        let id = SequenceId::from(INBOUND_SEQUENCE);

        let closer = {
            let fx = Arc::clone(&fx);
            let id = id.clone();
            tokio::spawn(async move { fx.state.store.close_sequence(&id) })
        };
        let readers = (1..=16u64).map(|n| {
            let fx = Arc::clone(&fx);
            tokio::spawn(async move {
                fx.service
                    .check_application_message(&RmMessage::application(INBOUND_SEQUENCE, n))
                    .await
            })
        });

        for result in join_all(readers).await {
            // each check sees the sequence either open or closed, never an error
            match result.unwrap().unwrap() {
                None => {}
                Some(fault) => assert_eq!(fault.kind(), FaultKind::SequenceClosed),
            }
        }
        closer.await.unwrap();

        let after = fx
            .service
            .check_application_message(&RmMessage::application(INBOUND_SEQUENCE, 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.kind(), FaultKind::SequenceClosed);
    }
}
