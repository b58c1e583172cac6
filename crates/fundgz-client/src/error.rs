//! Client error types.

use fundgz_core::FundCode;
use fundgz_feed::FeedError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Response for {actual} does not match requested fund {expected}")]
    IdentifierMismatch { expected: FundCode, actual: FundCode },

    #[error("Concurrency gate closed")]
    GateClosed,

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
}

pub type ClientResult<T> = Result<T, ClientError>;
