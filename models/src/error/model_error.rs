use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures raised while assembling model values.
///
/// Validation messages are user-facing: they name the field and the rule it
/// broke ("Port must be non-zero"), since a rejected `ServerInfo` usually
/// means supervisor state went inconsistent between spawn and report.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// Validation failure attributed to the caller's position.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}
