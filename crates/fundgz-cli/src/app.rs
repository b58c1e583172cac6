//! Application orchestration.
//!
//! Each subcommand is one flow over the code store:
//! - run: load codes, fetch valuations with bounded concurrency, render
//! - add: prompt for code/label pairs until cancelled, append each
//! - delete: pick one tracked fund and remove it
//! - list: print the stored records
//!
//! Output goes to an injected writer and input comes from a `Prompter`.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::render::TableRenderer;
use fundgz_client::{FetchReport, ReqwestTransport, ValuationFetcher};
use fundgz_core::{FundCode, TrackedFund};
use fundgz_feed::{JsonpExtractor, SnapshotDecoder};
use fundgz_store::{CodeStore, StoreError};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of the run flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The store file does not exist yet.
    NotInitialized,
    /// The store exists but tracks nothing.
    Empty,
    Rendered(FetchReport),
}

/// Result of the delete flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotInitialized,
    Empty,
    Cancelled,
    Removed(TrackedFund),
    /// The chosen fund disappeared from the store before removal.
    Missing(TrackedFund),
}

/// Main application.
pub struct Application {
    config: AppConfig,
    store: CodeStore,
    renderer: TableRenderer,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let store = CodeStore::new(config.store.path.clone());
        Self {
            config,
            store,
            renderer: TableRenderer::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: TableRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &CodeStore {
        &self.store
    }

    /// Build the HTTP-backed fetcher from configuration.
    pub fn build_fetcher(&self) -> AppResult<ValuationFetcher> {
        let settings = &self.config.endpoint;
        let endpoint = settings.endpoint()?;
        let detector = settings.charset_detector(&endpoint)?;
        let timeout = settings.request_timeout();
        let transport = ReqwestTransport::new(timeout)?;

        debug!(
            template = endpoint.template(),
            tld = ?detector.tld(),
            timeout_ms = settings.timeout_ms,
            "Fetcher configured"
        );

        Ok(ValuationFetcher::new(
            Arc::new(transport),
            endpoint,
            SnapshotDecoder::new(JsonpExtractor::new(Arc::new(detector))),
        )
        .with_request_timeout(timeout))
    }

    /// Fetch and render valuations over the configured endpoint.
    pub async fn run(
        &self,
        concurrency: Option<usize>,
        out: &mut dyn Write,
    ) -> AppResult<RunOutcome> {
        let fetcher = self.build_fetcher()?;
        self.run_with(&fetcher, concurrency, out).await
    }

    /// Fetch and render valuations with a given fetcher.
    ///
    /// `concurrency` overrides the configured limit.
    pub async fn run_with(
        &self,
        fetcher: &ValuationFetcher,
        concurrency: Option<usize>,
        out: &mut dyn Write,
    ) -> AppResult<RunOutcome> {
        let Some(funds) = self.load_or_guide(out)? else {
            return Ok(RunOutcome::NotInitialized);
        };
        if funds.is_empty() {
            writeln!(out, "No funds tracked. Run `fundgz add` to add one.")?;
            return Ok(RunOutcome::Empty);
        }

        let codes: Vec<FundCode> = funds.into_iter().map(|f| f.identifier).collect();
        let limit = concurrency.unwrap_or(self.config.endpoint.concurrency);
        info!(funds = codes.len(), limit, "Fetching valuations");

        let slots = fetcher.fetch_all(&codes, limit).await;
        self.renderer.render(&slots, out)?;

        let report = FetchReport::from_slots(&slots);
        if !report.is_complete() {
            writeln!(
                out,
                "{} of {} funds could not be fetched.",
                report.failed, report.requested
            )?;
        }
        Ok(RunOutcome::Rendered(report))
    }

    /// Prompt for funds until the user cancels or submits an empty code.
    ///
    /// Returns the number of funds added. Invalid input and duplicates are
    /// reported and the session continues.
    pub fn add(&self, prompter: &mut dyn Prompter, out: &mut dyn Write) -> AppResult<usize> {
        writeln!(
            out,
            "Adding funds to {}. Submit an empty code or press Ctrl+D to finish.",
            self.store.path().display()
        )?;

        let mut added = 0;
        loop {
            let Some(raw_code) = prompter.input("Fund code")? else {
                break;
            };
            if raw_code.trim().is_empty() {
                break;
            }

            let code = match FundCode::new(&raw_code) {
                Ok(code) => code,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };
            if self.store.contains(&code)? {
                writeln!(out, "Fund {code} is already tracked.")?;
                continue;
            }

            let Some(label) = prompter.input("Fund name")? else {
                break;
            };
            let fund = match TrackedFund::new(&label, code) {
                Ok(fund) => fund,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };

            match self.store.append_one(&fund) {
                Ok(()) => {
                    info!(code = %fund.identifier, "Fund added");
                    writeln!(out, "Added: {}", fund.to_line())?;
                    added += 1;
                }
                Err(StoreError::DuplicateIdentifier(code)) => {
                    writeln!(out, "Fund {code} is already tracked.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        writeln!(out, "Done, {added} fund(s) added.")?;
        Ok(added)
    }

    /// Let the user pick one tracked fund and remove it.
    pub fn delete(
        &self,
        prompter: &mut dyn Prompter,
        out: &mut dyn Write,
    ) -> AppResult<DeleteOutcome> {
        let Some(funds) = self.load_or_guide(out)? else {
            return Ok(DeleteOutcome::NotInitialized);
        };
        if funds.is_empty() {
            writeln!(out, "No funds tracked.")?;
            return Ok(DeleteOutcome::Empty);
        }

        let items: Vec<String> = funds.iter().map(TrackedFund::to_line).collect();
        let Some(fund) = prompter
            .select("Select the fund to delete", &items)?
            .and_then(|index| funds.get(index))
        else {
            writeln!(out, "Deletion cancelled.")?;
            return Ok(DeleteOutcome::Cancelled);
        };

        if self.store.remove_one(&fund.identifier)? {
            info!(code = %fund.identifier, "Fund deleted");
            writeln!(out, "Deleted: {}", fund.to_line())?;
            Ok(DeleteOutcome::Removed(fund.clone()))
        } else {
            writeln!(out, "Fund {} is no longer tracked.", fund.identifier)?;
            Ok(DeleteOutcome::Missing(fund.clone()))
        }
    }

    /// Print the stored records. Returns how many were printed.
    pub fn list(&self, out: &mut dyn Write) -> AppResult<usize> {
        let Some(funds) = self.load_or_guide(out)? else {
            return Ok(0);
        };
        if funds.is_empty() {
            writeln!(out, "No funds tracked.")?;
        }
        for fund in &funds {
            writeln!(out, "{}", fund.to_line())?;
        }
        Ok(funds.len())
    }

    /// Load every record, or print guidance and return `None` when the store
    /// has not been created yet.
    fn load_or_guide(&self, out: &mut dyn Write) -> AppResult<Option<Vec<TrackedFund>>> {
        match self.store.load_all() {
            Ok(funds) => Ok(Some(funds)),
            Err(e) if e.is_not_initialized() => {
                writeln!(
                    out,
                    "No fund list found at {}. Run `fundgz add` first.",
                    self.store.path().display()
                )?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
