//! Error types for plant-side models.

use thiserror::Error;

pub type DynamicsResult<T> = Result<T, DynamicsError>;

#[derive(Error, Debug)]
pub enum DynamicsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value in {what}")]
    NonFinite { what: &'static str },

    #[error("Numeric failure: {what}")]
    Numeric { what: String },
}

impl From<arm_core::CoreError> for DynamicsError {
    fn from(e: arm_core::CoreError) -> Self {
        match e {
            arm_core::CoreError::NonFinite { what, .. } => DynamicsError::NonFinite { what },
        }
    }
}
