//! Valuation payload parsing.
//!
//! Maps the endpoint's JSON object onto `ValuationSnapshot`. Only four
//! fields are read; everything else in the payload is ignored.

use crate::error::{FeedError, FeedResult};
use crate::jsonp::JsonpExtractor;
use fundgz_core::{FundCode, ValuationSnapshot};
use serde::Deserialize;
use tracing::debug;

/// Raw valuation object from the endpoint.
/// Format: {"fundcode": "001186", "name": "...", "gszzl": "-2.03", "gztime": "2021-03-02 15:00", ...}
#[derive(Debug, Deserialize)]
struct RawValuation {
    fundcode: String,
    name: String,
    /// Estimated change percent.
    gszzl: String,
    /// Estimate timestamp.
    gztime: String,
}

/// Map a decoded JSON object to a snapshot.
pub fn parse_snapshot(value: serde_json::Value) -> FeedResult<ValuationSnapshot> {
    let raw: RawValuation = serde_json::from_value(value)
        .map_err(|e| FeedError::MalformedPayload(format!("unexpected valuation shape: {e}")))?;

    let identifier = FundCode::new(&raw.fundcode)
        .map_err(|e| FeedError::MalformedPayload(format!("bad fundcode: {e}")))?;

    Ok(ValuationSnapshot {
        identifier,
        name: raw.name,
        change_percent: raw.gszzl,
        as_of: raw.gztime,
    })
}

/// Decodes raw response bodies into snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDecoder {
    extractor: JsonpExtractor,
}

impl SnapshotDecoder {
    pub fn new(extractor: JsonpExtractor) -> Self {
        Self { extractor }
    }

    /// Extract the JSONP object and map it to a snapshot.
    pub fn decode(&self, raw: &[u8]) -> FeedResult<ValuationSnapshot> {
        let value = self.extractor.extract(raw)?;
        let snapshot = parse_snapshot(value)?;
        debug!(
            code = %snapshot.identifier,
            change = %snapshot.change_percent,
            as_of = %snapshot.as_of,
            "Valuation decoded"
        );
        Ok(snapshot)
    }
}
