//! Valuation snapshot types.
//!
//! A snapshot is constructed per run from one endpoint response and is never
//! persisted.

use crate::FundCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the estimated change, taken from the sign character of
/// the change percentage string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Classify a change percentage string.
    ///
    /// A leading `-` is `Down`; any other leading character (or an empty
    /// string) is `Up`. No numeric parsing happens, so `"-0.00"` is `Down`.
    pub fn from_change_percent(change_percent: &str) -> Self {
        if change_percent.starts_with('-') {
            Self::Down
        } else {
            Self::Up
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// One fund's latest estimated valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// Fund identifier as reported by the endpoint (`fundcode`).
    pub identifier: FundCode,
    /// Fund name (`name`).
    pub name: String,
    /// Estimated change in percent, verbatim (`gszzl`, e.g. "-1.23").
    pub change_percent: String,
    /// Estimate timestamp, verbatim (`gztime`, e.g. "2021-03-02 15:00").
    pub as_of: String,
}

impl ValuationSnapshot {
    pub fn trend(&self) -> Trend {
        Trend::from_change_percent(&self.change_percent)
    }
}
