//! Domain module for fault management
//!
//! Contains wire constants, value objects, entities, errors and reason texts.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod reasons;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
