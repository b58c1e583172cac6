//! Flat-file code store for fundgz.
//!
//! Tracked funds live in a newline-delimited UTF-8 text file, one
//! `label|identifier` record per line, in the order they were added.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{CodeStore, DEFAULT_STORE_FILE};
