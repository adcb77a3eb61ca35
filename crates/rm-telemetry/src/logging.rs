//! Structured logging macros.
//!
//! Fault checks run inside a span carrying `subsystem`; events logged
//! outside one use `log_event!` to carry the same field.

/// Subsystem name shared with the fault check spans.
pub use rm_faults::SUBSYSTEM;

/// Log an event with the subsystem field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $crate::logging::SUBSYSTEM,
            $($($field)*,)?
            $msg
        )
    };
}
