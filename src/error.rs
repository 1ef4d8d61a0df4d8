//! Error taxonomy.
//!
//! A pattern that never appears is not an error; the locator reports it with
//! [`crate::constants::NOT_FOUND`]. Everything here aborts the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to construct random source: {0}")]
    RandomSource(String),

    #[error("trial count must be at least 1")]
    ZeroTrials,

    #[error("invalid pattern {0:?}: expected 3 symbols of U/D")]
    InvalidPattern(String),

    #[error("invalid sequence: {reason}")]
    InvalidSequence { reason: String },

    #[error("invalid value for {flag}: {value:?}")]
    InvalidArgument { flag: &'static str, value: String },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
