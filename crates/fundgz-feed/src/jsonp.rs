//! JSONP envelope stripping.
//!
//! Payload shape: `jsonpgz({"fundcode": "...", ...});`
//!
//! The JSON object is captured greedily from the first `{` to the last `}`
//! of the decoded text. This is not a balanced-brace scan: two top-level
//! objects in one payload are captured as a single span, which then fails
//! JSON parsing.

use crate::charset::{CharsetDetector, SniffingDetector};
use crate::error::{FeedError, FeedResult};
use std::sync::Arc;
use tracing::{debug, trace};

/// Maximum payload excerpt included in error messages.
const EXCERPT_CHARS: usize = 64;

/// Extracts the JSON object embedded in a JSONP response.
#[derive(Clone)]
pub struct JsonpExtractor {
    detector: Arc<dyn CharsetDetector>,
}

impl JsonpExtractor {
    pub fn new(detector: Arc<dyn CharsetDetector>) -> Self {
        Self { detector }
    }

    /// Decode raw bytes to text using the detected charset.
    ///
    /// Malformed sequences are replaced rather than rejected.
    pub fn decode_text(&self, raw: &[u8]) -> String {
        let detection = self.detector.detect(raw);
        let (text, used, had_errors) = detection.encoding.decode(raw);
        if had_errors {
            debug!(
                encoding = used.name(),
                confident = detection.confident,
                "Payload contained malformed sequences, replaced"
            );
        }
        text.into_owned()
    }

    /// Extract and parse the embedded JSON object.
    pub fn extract(&self, raw: &[u8]) -> FeedResult<serde_json::Value> {
        let text = self.decode_text(raw);
        let span = brace_span(&text).ok_or_else(|| {
            FeedError::MalformedPayload(format!("no JSON object in '{}'", excerpt(&text)))
        })?;
        trace!(len = span.len(), "JSONP span captured");

        serde_json::from_str(span).map_err(|e| {
            FeedError::MalformedPayload(format!("invalid JSON ({e}) in '{}'", excerpt(span)))
        })
    }
}

impl Default for JsonpExtractor {
    fn default() -> Self {
        Self::new(Arc::new(SniffingDetector::default()))
    }
}

impl std::fmt::Debug for JsonpExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonpExtractor").finish_non_exhaustive()
    }
}

/// Extract the embedded JSON object with the default detector.
pub fn extract(raw: &[u8]) -> FeedResult<serde_json::Value> {
    JsonpExtractor::default().extract(raw)
}

/// Greedy span from the first `{` to the last `}`, inclusive.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    if text.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
