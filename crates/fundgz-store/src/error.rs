//! Code store error types.

use fundgz_core::FundCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Code store not initialized: {} does not exist", path.display())]
    NotInitialized { path: PathBuf },

    #[error("Fund code already tracked: {0}")]
    DuplicateIdentifier(FundCode),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the store file is missing (the user has not added any fund yet).
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
