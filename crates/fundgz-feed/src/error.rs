//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown charset label: {0}")]
    UnknownCharset(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
