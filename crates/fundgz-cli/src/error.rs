//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] fundgz_store::StoreError),

    #[error("Client error: {0}")]
    Client(#[from] fundgz_client::ClientError),

    #[error("Feed error: {0}")]
    Feed(#[from] fundgz_feed::FeedError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] fundgz_telemetry::TelemetryError),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
