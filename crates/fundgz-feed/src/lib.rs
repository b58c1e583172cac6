//! Valuation feed decoding for fundgz.
//!
//! Turns raw endpoint bytes of unknown encoding into typed snapshots:
//! charset sniffing, JSONP envelope stripping, then field mapping.

pub mod charset;
pub mod error;
pub mod jsonp;
pub mod parser;

pub use charset::{CharsetDetector, Detection, SniffingDetector};
pub use error::{FeedError, FeedResult};
pub use jsonp::{brace_span, extract, JsonpExtractor};
pub use parser::{parse_snapshot, SnapshotDecoder};
