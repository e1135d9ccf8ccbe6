//! Error types for result extraction and storage.

use thiserror::Error;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Empty solution: {what}")]
    EmptySolution { what: &'static str },

    #[error("Malformed solution: {what}")]
    Malformed { what: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
