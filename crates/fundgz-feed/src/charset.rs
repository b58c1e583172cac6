//! Charset detection for endpoint payloads.
//!
//! The valuation endpoint does not reliably declare its encoding, and
//! legacy deployments answer in GBK. Detection is pluggable through
//! `CharsetDetector`; `SniffingDetector` is the default.

use crate::error::{FeedError, FeedResult};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Result of charset detection.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    /// Encoding to decode with.
    pub encoding: &'static Encoding,
    /// Whether the detector is confident in the guess.
    pub confident: bool,
}

impl Detection {
    pub fn confident(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            confident: true,
        }
    }

    pub fn tentative(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            confident: false,
        }
    }
}

/// Guesses the text encoding of a byte buffer.
pub trait CharsetDetector: Send + Sync {
    fn detect(&self, bytes: &[u8]) -> Detection;
}

/// Statistical charset sniffing.
///
/// Order of preference:
/// 1. Strict UTF-8 validation
/// 2. A confident `chardetng` guess (biased by the TLD hint, if any)
/// 3. The fallback encoding, if it decodes the bytes without errors
/// 4. The tentative `chardetng` guess
#[derive(Debug, Clone, Default)]
pub struct SniffingDetector {
    /// Top-level domain of the payload origin (e.g., "cn").
    tld: Option<String>,
    /// Legacy encoding to try when sniffing is inconclusive.
    fallback: Option<&'static Encoding>,
}

impl SniffingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bias detection towards the encodings customary for a TLD.
    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        let tld = tld.into().trim_matches('.').to_ascii_lowercase();
        self.tld = (!tld.is_empty()).then_some(tld);
        self
    }

    /// Derive the TLD hint from a host name (e.g., "fundgz.1234567.com.cn" → "cn").
    pub fn with_host(self, host: &str) -> Self {
        match host.trim_end_matches('.').rsplit('.').next() {
            // IP literals carry no locale information.
            Some(label) if !label.chars().all(|c| c.is_ascii_digit()) => self.with_tld(label),
            _ => self,
        }
    }

    pub fn with_fallback(mut self, encoding: &'static Encoding) -> Self {
        self.fallback = Some(encoding);
        self
    }

    /// Set the fallback encoding from a WHATWG label (e.g., "gbk").
    pub fn with_fallback_label(self, label: &str) -> FeedResult<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| FeedError::UnknownCharset(label.to_string()))?;
        Ok(self.with_fallback(encoding))
    }

    pub fn tld(&self) -> Option<&str> {
        self.tld.as_deref()
    }

    pub fn fallback(&self) -> Option<&'static Encoding> {
        self.fallback
    }
}

impl CharsetDetector for SniffingDetector {
    fn detect(&self, bytes: &[u8]) -> Detection {
        if std::str::from_utf8(bytes).is_ok() {
            return Detection::confident(UTF_8);
        }

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        let (guess, confident) = detector.guess_assess(self.tld.as_deref().map(str::as_bytes), false);

        if confident {
            debug!(encoding = guess.name(), "Charset sniffed");
            return Detection::confident(guess);
        }

        if let Some(fallback) = self.fallback {
            if fallback
                .decode_without_bom_handling_and_without_replacement(bytes)
                .is_some()
            {
                debug!(
                    encoding = fallback.name(),
                    sniffed = guess.name(),
                    "Charset sniffing inconclusive, using fallback"
                );
                return Detection::tentative(fallback);
            }
        }

        debug!(encoding = guess.name(), "Charset sniffing inconclusive");
        Detection::tentative(guess)
    }
}
