//! Application configuration.

use crate::error::{AppError, AppResult};
use fundgz_client::{Endpoint, DEFAULT_CONCURRENCY, DEFAULT_URL_TEMPLATE};
use fundgz_feed::SniffingDetector;
use fundgz_store::DEFAULT_STORE_FILE;
use fundgz_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "FUNDGZ_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "fundgz.toml";

/// Code store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the `label|code` records file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Valuation endpoint and fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL template containing `{code}`.
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Maximum requests in flight. Default: 10.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-request timeout (ms). Default: 10,000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Charset tried when sniffing is inconclusive. Default: "gbk".
    #[serde(default = "default_charset_fallback")]
    pub charset_fallback: String,
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_charset_fallback() -> String {
    "gbk".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            concurrency: default_concurrency(),
            timeout_ms: default_timeout_ms(),
            charset_fallback: default_charset_fallback(),
        }
    }
}

impl EndpointConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse the URL template.
    pub fn endpoint(&self) -> AppResult<Endpoint> {
        Ok(Endpoint::new(self.url_template.as_str())?)
    }

    /// Charset detector tuned for `endpoint`'s host and the configured fallback.
    pub fn charset_detector(&self, endpoint: &Endpoint) -> AppResult<SniffingDetector> {
        let mut detector = SniffingDetector::new().with_fallback_label(&self.charset_fallback)?;
        if let Some(host) = endpoint.host() {
            detector = detector.with_host(host);
        }
        Ok(detector)
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `FUNDGZ_CONFIG` is used, then
    /// `fundgz.toml` if present, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Self::from_file(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Reject settings the fetcher cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(AppError::Config("store.path must not be empty".to_string()));
        }
        if self.endpoint.concurrency == 0 {
            return Err(AppError::Config(
                "endpoint.concurrency must be at least 1".to_string(),
            ));
        }
        if self.endpoint.timeout_ms == 0 {
            return Err(AppError::Config(
                "endpoint.timeout_ms must be greater than 0".to_string(),
            ));
        }

        let endpoint = self
            .endpoint
            .endpoint()
            .map_err(|e| AppError::Config(format!("endpoint.url_template: {e}")))?;
        self.endpoint
            .charset_detector(&endpoint)
            .map_err(|e| AppError::Config(format!("endpoint.charset_fallback: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.path, PathBuf::from("fund-code.txt"));
        assert_eq!(config.endpoint.concurrency, 10);
        assert_eq!(config.endpoint.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.telemetry.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [store]
            path = "/tmp/funds.txt"

            [endpoint]
            concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("/tmp/funds.txt"));
        assert_eq!(config.endpoint.concurrency, 4);
        assert_eq!(config.endpoint.timeout_ms, 10_000);
        assert_eq!(config.endpoint.url_template, DEFAULT_URL_TEMPLATE);
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = AppConfig::from_toml("[endpoint]\nconcurrency = \"many\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.endpoint.concurrency = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.endpoint.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.endpoint.url_template = "http://fund.test/js/latest.js".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.endpoint.charset_fallback = "klingon".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_detector_uses_endpoint_host() {
        let config = EndpointConfig::default();
        let endpoint = config.endpoint().unwrap();
        let detector = config.charset_detector(&endpoint).unwrap();

        assert_eq!(detector.tld(), Some("cn"));
        assert_eq!(detector.fallback().map(|e| e.name()), Some("GBK"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[telemetry]\nlog_level = \"debug\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
