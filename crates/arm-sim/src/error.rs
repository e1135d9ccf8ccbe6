//! Error types for the simulation core.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by a simulation run.
///
/// Configuration problems are raised before any integration step executes;
/// integration and evaluation failures abort the run with no partial result.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Integration failure: {what}")]
    Integration { what: String },

    #[error("Evaluation error: {what}")]
    Evaluation { what: String },

    #[error("Results error: {what}")]
    Results { what: String },
}

impl From<arm_dynamics::DynamicsError> for SimError {
    fn from(e: arm_dynamics::DynamicsError) -> Self {
        SimError::Evaluation {
            what: e.to_string(),
        }
    }
}

impl From<arm_control::ControlError> for SimError {
    fn from(e: arm_control::ControlError) -> Self {
        SimError::Evaluation {
            what: e.to_string(),
        }
    }
}

impl From<ode_solvers::dop_shared::IntegrationError> for SimError {
    fn from(e: ode_solvers::dop_shared::IntegrationError) -> Self {
        SimError::Integration {
            what: e.to_string(),
        }
    }
}

impl From<arm_results::ResultsError> for SimError {
    fn from(e: arm_results::ResultsError) -> Self {
        SimError::Results {
            what: e.to_string(),
        }
    }
}
