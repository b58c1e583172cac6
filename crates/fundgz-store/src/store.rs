//! Newline-delimited `label|identifier` file store.
//!
//! - Records keep insertion order
//! - Appends never rewrite existing lines
//! - Removals rewrite through a sibling temp file and rename, so an
//!   interrupted write leaves the previous file intact

use crate::error::{StoreError, StoreResult};
use fundgz_core::{FundCode, TrackedFund};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default store file name, resolved against the working directory.
pub const DEFAULT_STORE_FILE: &str = "fund-code.txt";

/// Code store backed by a flat text file.
#[derive(Debug, Clone)]
pub struct CodeStore {
    path: PathBuf,
}

impl CodeStore {
    /// Create a store handle. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the store file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load every record in file order.
    ///
    /// Blank lines are skipped. A missing file is `NotInitialized`.
    pub fn load_all(&self) -> StoreResult<Vec<TrackedFund>> {
        let contents = self.read_contents()?;
        let funds = parse_records(&contents)?;
        debug!(path = %self.path.display(), count = funds.len(), "Loaded code store");
        Ok(funds)
    }

    /// Check whether a fund code is already tracked. A missing file tracks nothing.
    pub fn contains(&self, code: &FundCode) -> StoreResult<bool> {
        match self.load_all() {
            Ok(funds) => Ok(funds.iter().any(|f| &f.identifier == code)),
            Err(StoreError::NotInitialized { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Append one record, creating the file if needed.
    ///
    /// Refuses a code that is already present (exact, case-sensitive match)
    /// without writing anything.
    pub fn append_one(&self, fund: &TrackedFund) -> StoreResult<()> {
        let existing = match self.read_contents() {
            Ok(contents) => contents,
            Err(StoreError::NotInitialized { .. }) => {
                self.ensure_parent_dir()?;
                String::new()
            }
            Err(e) => return Err(e),
        };

        if parse_records(&existing)?
            .iter()
            .any(|f| f.identifier == fund.identifier)
        {
            return Err(StoreError::DuplicateIdentifier(fund.identifier.clone()));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Keep one record per line even if the file was edited by hand.
        if !existing.is_empty() && !existing.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        writeln!(file, "{}", fund.to_line())?;
        file.flush()?;

        info!(
            path = %self.path.display(),
            code = %fund.identifier,
            label = %fund.label,
            "Appended fund to code store"
        );
        Ok(())
    }

    /// Remove the record with the given code.
    ///
    /// Returns `false` (and leaves the file untouched) if the code is not
    /// tracked. Remaining records keep their order.
    pub fn remove_one(&self, code: &FundCode) -> StoreResult<bool> {
        let mut funds = self.load_all()?;

        let Some(position) = funds.iter().position(|f| &f.identifier == code) else {
            debug!(code = %code, "Fund not tracked, nothing to remove");
            return Ok(false);
        };
        let removed = funds.remove(position);

        self.rewrite(&funds)?;

        info!(
            path = %self.path.display(),
            code = %removed.identifier,
            remaining = funds.len(),
            "Removed fund from code store"
        );
        Ok(true)
    }

    fn read_contents(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotInitialized {
                path: self.path.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn rewrite(&self, funds: &[TrackedFund]) -> StoreResult<()> {
        let mut contents = String::new();
        for fund in funds {
            contents.push_str(&fund.to_line());
            contents.push('\n');
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

fn parse_records(contents: &str) -> StoreResult<Vec<TrackedFund>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            TrackedFund::parse_line(line).map_err(|e| StoreError::InvalidRecord {
                line: idx + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}
