//! Integration tests for fundgz-client.
//!
//! These tests run the real reqwest transport against a local HTTP server:
//! - JSONP bodies in UTF-8 and GBK
//! - Non-2xx statuses and stalled responses
//! - Concurrency bound over real sockets

pub mod common;
