//! Configuration for fault management

use crate::domain::constants::MAX_MESSAGE_NUMBER;
use crate::domain::errors::FaultError;
use serde::{Deserialize, Serialize};

/// Fault management configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Largest message number accepted before a rollover fault
    pub max_message_number: u64,
    /// Attach optional detail elements to emitted faults. Kinds that
    /// mandate a detail keep it either way.
    pub attach_detail: bool,
    /// Run the message number rollover check on application messages
    pub detect_rollover: bool,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            max_message_number: MAX_MESSAGE_NUMBER,
            attach_detail: true,
            detect_rollover: true,
        }
    }
}

impl FaultConfig {
    pub fn validate(&self) -> Result<(), FaultError> {
        if self.max_message_number == 0 {
            return Err(FaultError::InvalidConfig(
                "max_message_number cannot be 0".to_string(),
            ));
        }

        if self.max_message_number > MAX_MESSAGE_NUMBER {
            return Err(FaultError::InvalidConfig(format!(
                "max_message_number {} exceeds protocol maximum {}",
                self.max_message_number, MAX_MESSAGE_NUMBER
            )));
        }

        Ok(())
    }

    pub fn with_max_message_number(mut self, max: u64) -> Self {
        self.max_message_number = max;
        self
    }

    pub fn with_attach_detail(mut self, attach: bool) -> Self {
        self.attach_detail = attach;
        self
    }

    pub fn with_detect_rollover(mut self, detect: bool) -> Self {
        self.detect_rollover = detect;
        self
    }
}
