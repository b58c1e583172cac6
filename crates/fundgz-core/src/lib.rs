//! Core domain types for the fundgz fund valuation tracker.
//!
//! This crate provides the types shared by every other crate:
//! - `FundCode`: Validated fund identifier used to build endpoint URLs
//! - `TrackedFund`: One `label|identifier` record of the code store
//! - `ValuationSnapshot`: One fund's estimated valuation for a single run
//! - `Trend`: Up/down classification of a change percentage

pub mod error;
pub mod fund;
pub mod snapshot;

pub use error::{CoreError, Result};
pub use fund::{FundCode, TrackedFund, RECORD_DELIMITER};
pub use snapshot::{Trend, ValuationSnapshot};
