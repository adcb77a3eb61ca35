//! # Integration Tests
//!
//! Exercise `rm-faults` through its public API with the in-memory
//! adapters and the telemetry crate.

pub mod concurrency;
pub mod scenarios;
pub mod telemetry;
