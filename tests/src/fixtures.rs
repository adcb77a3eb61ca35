//! # Test Fixtures
//!
//! Fixtures implement `TestResource` and receive their collaborators through
//! constructors. `Scoped` runs `set_up` on entry and `tear_down` on drop.

use async_trait::async_trait;
use rm_faults::domain::{CreateSequenceRecord, NextMessageRecord};
use rm_faults::{
    CreateSequencePolicy, FaultConfig, FaultManagementService, FaultMetrics, InMemorySequenceStore,
    MessageNumber, SequenceId, SequenceProperty, SequenceStore, StoreError,
};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Explicit lifecycle for a test resource.
pub trait TestResource {
    fn set_up(&mut self);
    fn tear_down(&mut self);
}

/// Holds a resource between `set_up` and `tear_down`.
pub struct Scoped<R: TestResource> {
    resource: R,
}

impl<R: TestResource> Scoped<R> {
    pub fn new(mut resource: R) -> Self {
        resource.set_up();
        Self { resource }
    }
}

impl<R: TestResource> Deref for Scoped<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R: TestResource> DerefMut for Scoped<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.resource
    }
}

impl<R: TestResource> Drop for Scoped<R> {
    fn drop(&mut self) {
        self.resource.tear_down();
    }
}

// =============================================================================
// SEQUENCE STATE
// =============================================================================

/// Outbound sequence we created; acks go to a real endpoint.
pub const OUTBOUND_SEQUENCE: &str = "urn:uuid:seq-outbound";
/// Inbound sequence we accepted; acks go to the anonymous URI.
pub const INBOUND_SEQUENCE: &str = "urn:uuid:seq-inbound";
/// Inbound sequence that has been closed.
pub const CLOSED_SEQUENCE: &str = "urn:uuid:seq-closed";
/// Inbound sequence with a declared last message number of `BOUNDED_LAST`.
pub const BOUNDED_SEQUENCE: &str = "urn:uuid:seq-bounded";
pub const BOUNDED_LAST: MessageNumber = 10;

pub const PEER_ACKS_TO: &str = "http://peer.example/rm/acks";

/// Store seeded with one sequence per interesting state.
pub struct StoreFixture {
    pub store: Arc<InMemorySequenceStore>,
}

impl StoreFixture {
    pub fn new(store: Arc<InMemorySequenceStore>) -> Self {
        Self { store }
    }
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new(Arc::new(InMemorySequenceStore::new()))
    }
}

impl TestResource for StoreFixture {
    fn set_up(&mut self) {
        let outbound = SequenceId::from(OUTBOUND_SEQUENCE);
        self.store.register_outbound("internal-outbound", outbound.clone());
        self.store.set_acks_to(&outbound, PEER_ACKS_TO);

        let inbound = SequenceId::from(INBOUND_SEQUENCE);
        self.store.register_inbound(inbound.clone(), 1);
        self.store
            .set_acks_to(&inbound, rm_faults::domain::constants::WSA_FINAL_ANONYMOUS_URI);

        let closed = SequenceId::from(CLOSED_SEQUENCE);
        self.store.register_inbound(closed.clone(), 5);
        self.store.close_sequence(&closed);

        let bounded = SequenceId::from(BOUNDED_SEQUENCE);
        self.store.register_inbound(bounded.clone(), 4);
        self.store.set_last_message_number(&bounded, BOUNDED_LAST);
    }

    fn tear_down(&mut self) {
        self.store.clear();
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Service wired to a seeded store and atomic metrics.
pub struct ServiceFixture {
    pub state: StoreFixture,
    pub metrics: Arc<FaultMetrics>,
    pub service: FaultManagementService<InMemorySequenceStore>,
}

impl ServiceFixture {
    pub fn new(
        state: StoreFixture,
        config: FaultConfig,
        policy: Arc<dyn CreateSequencePolicy>,
    ) -> Result<Self, rm_faults::FaultError> {
        let metrics = Arc::new(FaultMetrics::new());
        let service = FaultManagementService::builder(Arc::clone(&state.store))
            .config(config)
            .policy(policy)
            .metrics(metrics.clone())
            .build()?;
        Ok(Self {
            state,
            metrics,
            service,
        })
    }

    /// Default config, accept-all policy.
    pub fn standard() -> Result<Self, rm_faults::FaultError> {
        Self::new(
            StoreFixture::default(),
            FaultConfig::default(),
            Arc::new(rm_faults::AcceptAllPolicy),
        )
    }
}

impl TestResource for ServiceFixture {
    fn set_up(&mut self) {
        self.state.set_up();
    }

    fn tear_down(&mut self) {
        self.state.tear_down();
    }
}

// =============================================================================
// FAILURE INJECTION
// =============================================================================

/// Store that delegates to an in-memory store, counts reads and can be
/// switched into failure.
pub struct FlakyStore {
    inner: InMemorySequenceStore,
    failing: AtomicBool,
    reads: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: InMemorySequenceStore) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &InMemorySequenceStore {
        &self.inner
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn guard(&self) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SequenceStore for FlakyStore {
    async fn find_create_sequence_records(
        &self,
        sequence_id: &SequenceId,
    ) -> Result<Vec<CreateSequenceRecord>, StoreError> {
        self.guard()?;
        self.inner.find_create_sequence_records(sequence_id).await
    }

    async fn all_next_message_records(&self) -> Result<Vec<NextMessageRecord>, StoreError> {
        self.guard()?;
        self.inner.all_next_message_records().await
    }

    async fn get_property(
        &self,
        sequence_id: &SequenceId,
        property: SequenceProperty,
    ) -> Result<Option<String>, StoreError> {
        self.guard()?;
        self.inner.get_property(sequence_id, property).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_fixture_seeds_and_clears() {
        let store = Arc::new(InMemorySequenceStore::new());
        {
            let _fixture = Scoped::new(StoreFixture::new(Arc::clone(&store)));
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let records = runtime
                .block_on(store.all_next_message_records())
                .unwrap();
            assert_eq!(records.len(), 3);
        }
        let runtime = tokio::runtime::Runtime::new().unwrap();
        assert!(runtime
            .block_on(store.all_next_message_records())
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_flaky_store_counts_and_fails() {
        let store = FlakyStore::new(InMemorySequenceStore::new());
        let id = SequenceId::from("seq");

        assert!(store.get_property(&id, SequenceProperty::Closed).await.is_ok());
        store.set_failing(true);
        assert!(matches!(
            store.get_property(&id, SequenceProperty::Closed).await,
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(store.reads(), 2);
    }
}
