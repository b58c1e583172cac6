//! Bounded concurrent valuation fetching for fundgz.
//!
//! Issues one GET per tracked fund against a templated endpoint, at most
//! K requests in flight, and reassembles results in input order. A failed
//! fund leaves an empty slot; it never aborts the batch.

pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod transport;

pub use endpoint::{Endpoint, CODE_PLACEHOLDER, DEFAULT_URL_TEMPLATE};
pub use error::{ClientError, ClientResult};
pub use fetcher::{FetchReport, ValuationFetcher, DEFAULT_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT};
pub use transport::{
    BoxFuture, DynTransport, HttpResponse, MockRoute, MockTransport, ReqwestTransport, Transport,
};
