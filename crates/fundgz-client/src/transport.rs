//! HTTP transport abstraction.
//!
//! The fetcher talks to the network only through `Transport`, which allows:
//! - Unit testing with `MockTransport` (scripted replies, in-flight counting)
//! - One pooled `reqwest::Client` shared read-only by every task

use crate::error::{ClientError, ClientResult};
use parking_lot::Mutex;
use reqwest::Client;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing GET requests.
pub trait Transport: Send + Sync {
    /// GET `url` and read the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ClientResult<HttpResponse>>;
}

/// Arc wrapper for Transport trait objects.
pub type DynTransport = Arc<dyn Transport>;

/// Transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fundgz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ClientResult<HttpResponse>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| self.map_error(e))?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(|e| self.map_error(e))?;
            trace!(url, status, len = body.len(), "GET completed");

            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}

/// Scripted reply of `MockTransport`.
#[derive(Debug, Clone)]
pub enum MockRoute {
    /// Reply with a status and body.
    Respond { status: u16, body: Vec<u8> },
    /// Fail with a network error.
    Fail(String),
    /// Never complete.
    Hang,
    /// Panic inside the request future.
    Panic,
}

impl MockRoute {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::Respond {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            body: Vec::new(),
        }
    }
}

/// Mock transport for testing.
///
/// Unrouted URLs answer 404. Tracks how many calls are in flight at once.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, MockRoute>>,
    /// Delay applied to every request before replying.
    latency: Duration,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the reply for one URL.
    pub fn route(&self, url: impl Into<String>, route: MockRoute) {
        self.routes.lock().insert(url.into(), route);
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Highest number of simultaneous calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter when a call ends, even by panic or drop.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ClientResult<HttpResponse>> {
        Box::pin(async move {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _guard = InFlightGuard(&self.in_flight);
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            self.requests.lock().push(url.to_string());

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            let route = self
                .routes
                .lock()
                .get(url)
                .cloned()
                .unwrap_or_else(|| MockRoute::status(404));

            match route {
                MockRoute::Respond { status, body } => Ok(HttpResponse { status, body }),
                MockRoute::Fail(message) => Err(ClientError::Network(message)),
                MockRoute::Hang => std::future::pending().await,
                MockRoute::Panic => panic!("mock transport panic for {url}"),
            }
        })
    }
}
