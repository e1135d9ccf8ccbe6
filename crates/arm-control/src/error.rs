//! Error types for compensator construction and evaluation.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error)]
pub enum ControlError {
    /// Invalid argument provided to a compensator constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Gain or system matrices have inconsistent shapes.
    #[error("Shape mismatch: {what}")]
    ShapeMismatch { what: &'static str },

    /// Non-finite value encountered while evaluating a compensator map.
    #[error("Non-finite value in {what}")]
    NonFinite { what: &'static str },
}

impl From<arm_core::CoreError> for ControlError {
    fn from(e: arm_core::CoreError) -> Self {
        match e {
            arm_core::CoreError::NonFinite { what, .. } => ControlError::NonFinite { what },
        }
    }
}
