//! In-Memory Sequence Store Adapter
//!
//! Implements the `SequenceStore` port over process-local maps. Used by
//! tests and by embedders that keep RM state in memory.

use crate::domain::constants::VALUE_TRUE;
use crate::domain::entities::{CreateSequenceRecord, NextMessageRecord};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::{MessageNumber, SequenceId, SequenceProperty};
use crate::ports::outbound::SequenceStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory sequence records.
pub struct InMemorySequenceStore {
    create_sequences: RwLock<Vec<CreateSequenceRecord>>,
    next_messages: RwLock<HashMap<SequenceId, NextMessageRecord>>,
    properties: RwLock<HashMap<(SequenceId, SequenceProperty), String>>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self {
            create_sequences: RwLock::new(Vec::new()),
            next_messages: RwLock::new(HashMap::new()),
            properties: RwLock::new(HashMap::new()),
        }
    }

    /// Record an outbound sequence created by a CreateSequence we sent.
    pub fn register_outbound(&self, internal_sequence_id: &str, sequence_id: SequenceId) {
        self.create_sequences.write().push(CreateSequenceRecord {
            internal_sequence_id: internal_sequence_id.to_string(),
            create_sequence_message_id: format!("urn:uuid:create-{}", internal_sequence_id),
            sequence_id,
        });
    }

    /// Record an inbound sequence we accepted.
    pub fn register_inbound(&self, sequence_id: SequenceId, next_message_number: MessageNumber) {
        self.next_messages.write().insert(
            sequence_id.clone(),
            NextMessageRecord {
                sequence_id,
                next_message_number,
            },
        );
    }

    /// Set a raw property value.
    ///
    /// `Closed` is monotonic: once `"true"` it is never overwritten.
    pub fn set_property(&self, sequence_id: &SequenceId, property: SequenceProperty, value: &str) {
        let mut properties = self.properties.write();
        let key = (sequence_id.clone(), property);
        if property == SequenceProperty::Closed
            && properties.get(&key).map(String::as_str) == Some(VALUE_TRUE)
        {
            return;
        }
        properties.insert(key, value.to_string());
    }

    pub fn close_sequence(&self, sequence_id: &SequenceId) {
        self.set_property(sequence_id, SequenceProperty::Closed, VALUE_TRUE);
    }

    pub fn set_last_message_number(&self, sequence_id: &SequenceId, last: MessageNumber) {
        self.set_property(
            sequence_id,
            SequenceProperty::LastMessageNumber,
            &last.to_string(),
        );
    }

    pub fn set_acks_to(&self, sequence_id: &SequenceId, acks_to: &str) {
        self.set_property(sequence_id, SequenceProperty::AcksTo, acks_to);
    }

    /// Drop all records and properties.
    pub fn clear(&self) {
        self.create_sequences.write().clear();
        self.next_messages.write().clear();
        self.properties.write().clear();
    }
}

impl Default for InMemorySequenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn find_create_sequence_records(
        &self,
        sequence_id: &SequenceId,
    ) -> Result<Vec<CreateSequenceRecord>, StoreError> {
        let records: Vec<_> = self
            .create_sequences
            .read()
            .iter()
            .filter(|r| &r.sequence_id == sequence_id)
            .cloned()
            .collect();
        debug!(%sequence_id, found = records.len(), "create sequence lookup");
        Ok(records)
    }

    async fn all_next_message_records(&self) -> Result<Vec<NextMessageRecord>, StoreError> {
        Ok(self.next_messages.read().values().cloned().collect())
    }

    async fn get_property(
        &self,
        sequence_id: &SequenceId,
        property: SequenceProperty,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .properties
            .read()
            .get(&(sequence_id.clone(), property))
            .cloned())
    }
}
