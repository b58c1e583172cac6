//! Structured logging for fundgz.
//!
//! Logs go to stderr so rendered tables on stdout stay clean.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogFormat, TelemetryConfig};
