//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits and the owned inbound message view.

mod in_memory_store;
pub mod message;
mod policy;

pub use in_memory_store::InMemorySequenceStore;
pub use message::RmMessage;
pub use policy::{AcceptAllPolicy, FnPolicy};
