//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// Single-line human readable output.
    Compact,
    /// JSON lines.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level or filter directive (e.g., "warn", "info,fundgz_client=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Filter directive after applying `-v` flags.
    ///
    /// 0 keeps the configured level, 1 is info, 2 is debug, 3+ is trace.
    pub fn effective_filter(&self, verbosity: u8) -> String {
        match verbosity {
            0 => self.log_level.clone(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    /// Output format, forced to JSON when `RUST_ENV=production`.
    pub fn effective_format(&self) -> LogFormat {
        let is_production = std::env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        if is_production {
            LogFormat::Json
        } else {
            self.format
        }
    }
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence over the configured level and `verbosity`.
pub fn init_logging(config: &TelemetryConfig, verbosity: u8) -> TelemetryResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = config.effective_filter(verbosity);
            EnvFilter::try_new(&directive)
                .map_err(|e| TelemetryError::InvalidFilter(format!("'{directive}': {e}")))?
        }
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.effective_format() {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
