//! Bounded concurrent valuation fetcher.
//!
//! Every fund of a batch is spawned up front into a `JoinSet`; a semaphore
//! admits at most `concurrency_limit` of them into the network call at a
//! time. Results are reassembled by input index, so slot `i` always belongs
//! to code `i` regardless of completion order.

use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::transport::{DynTransport, Transport};
use fundgz_core::{FundCode, ValuationSnapshot};
use fundgz_feed::SnapshotDecoder;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

/// Default maximum number of requests in flight.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome summary of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub requested: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl FetchReport {
    pub fn from_slots(slots: &[Option<ValuationSnapshot>]) -> Self {
        let fetched = slots.iter().filter(|s| s.is_some()).count();
        Self {
            requested: slots.len(),
            fetched,
            failed: slots.len() - fetched,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Fetches valuation snapshots for a batch of funds.
#[derive(Clone)]
pub struct ValuationFetcher {
    transport: DynTransport,
    endpoint: Endpoint,
    decoder: SnapshotDecoder,
    request_timeout: Duration,
}

impl ValuationFetcher {
    pub fn new(transport: DynTransport, endpoint: Endpoint, decoder: SnapshotDecoder) -> Self {
        Self {
            transport,
            endpoint,
            decoder,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound every request, including a stalled transport, by `timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch one fund, outside the batch gate.
    pub async fn fetch_one(&self, code: &FundCode) -> ClientResult<ValuationSnapshot> {
        let gate = Semaphore::new(1);
        let url = self.endpoint.url_for(code);
        fetch_snapshot(
            self.transport.as_ref(),
            &gate,
            &url,
            code,
            &self.decoder,
            self.request_timeout,
        )
        .await
    }

    /// Fetch every fund with at most `concurrency_limit` requests in flight.
    ///
    /// Returns exactly one slot per input code, in input order. A fund that
    /// fails for any reason (status, network, timeout, malformed payload,
    /// task panic) leaves its slot empty; the other slots are unaffected.
    /// A limit of zero is treated as one.
    pub async fn fetch_all(
        &self,
        codes: &[FundCode],
        concurrency_limit: usize,
    ) -> Vec<Option<ValuationSnapshot>> {
        let started = Instant::now();
        let limit = concurrency_limit.max(1);
        let gate = Arc::new(Semaphore::new(limit));
        let mut tasks = JoinSet::new();

        for (index, code) in codes.iter().enumerate() {
            let gate = Arc::clone(&gate);
            let transport = Arc::clone(&self.transport);
            let decoder = self.decoder.clone();
            let url = self.endpoint.url_for(code);
            let code = code.clone();
            let timeout = self.request_timeout;

            tasks.spawn(async move {
                let result =
                    fetch_snapshot(transport.as_ref(), &gate, &url, &code, &decoder, timeout).await;
                (index, code, result)
            });
        }

        let mut slots: Vec<Option<ValuationSnapshot>> = vec![None; codes.len()];

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(snapshot))) => slots[index] = Some(snapshot),
                Ok((index, code, Err(e))) => {
                    debug!(index, code = %code, error = %e, "Valuation fetch failed");
                }
                Err(e) => {
                    // The slot of a panicked task is unknown here and stays empty.
                    warn!(error = %e, "Valuation task did not complete");
                }
            }
        }

        let report = FetchReport::from_slots(&slots);
        info!(
            requested = report.requested,
            fetched = report.fetched,
            failed = report.failed,
            concurrency = limit,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Valuation batch complete"
        );

        slots
    }
}

impl std::fmt::Debug for ValuationFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationFetcher")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

async fn fetch_snapshot(
    transport: &dyn Transport,
    gate: &Semaphore,
    url: &str,
    code: &FundCode,
    decoder: &SnapshotDecoder,
    request_timeout: Duration,
) -> ClientResult<ValuationSnapshot> {
    let response = {
        let _permit = gate.acquire().await.map_err(|_| ClientError::GateClosed)?;
        trace!(url, "Requesting valuation");
        tokio::time::timeout(request_timeout, transport.get(url))
            .await
            .map_err(|_| ClientError::Timeout(request_timeout))??
    };

    if !response.is_success() {
        return Err(ClientError::Status(response.status));
    }

    let snapshot = decoder.decode(&response.body)?;
    if &snapshot.identifier != code {
        return Err(ClientError::IdentifierMismatch {
            expected: code.clone(),
            actual: snapshot.identifier,
        });
    }

    Ok(snapshot)
}
