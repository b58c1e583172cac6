//! Error types for fundgz-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid fund code: {0}")]
    InvalidFundCode(String),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
