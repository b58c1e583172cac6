//! Tracked fund identification types.
//!
//! A tracked fund is stored as a single `label|identifier` line. The line is
//! split at the first delimiter, so neither field may contain it.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field delimiter of a code store record.
pub const RECORD_DELIMITER: char = '|';

/// Fund identifier (e.g., "001186").
///
/// Substituted into the endpoint URL path, so it must be a single token:
/// non-empty, no whitespace, no record delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundCode(String);

impl FundCode {
    /// Create a validated fund code. Surrounding whitespace is trimmed.
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(CoreError::InvalidFundCode("empty code".to_string()));
        }
        if code.contains(RECORD_DELIMITER) {
            return Err(CoreError::InvalidFundCode(format!(
                "'{code}' contains the record delimiter '{RECORD_DELIMITER}'"
            )));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidFundCode(format!(
                "'{code}' contains whitespace"
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FundCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for FundCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FundCode> for String {
    fn from(code: FundCode) -> Self {
        code.0
    }
}

impl AsRef<str> for FundCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FundCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FundCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One record of the code store: a user-chosen label and the fund code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFund {
    /// Display label chosen by the user.
    pub label: String,
    /// Fund identifier.
    pub identifier: FundCode,
}

impl TrackedFund {
    /// Create a tracked fund, validating the label.
    pub fn new(label: impl AsRef<str>, identifier: FundCode) -> Result<Self> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(CoreError::InvalidLabel("empty label".to_string()));
        }
        if label.contains(RECORD_DELIMITER) {
            return Err(CoreError::InvalidLabel(format!(
                "'{label}' contains the record delimiter '{RECORD_DELIMITER}'"
            )));
        }
        if label.contains(['\n', '\r']) {
            return Err(CoreError::InvalidLabel("label spans multiple lines".to_string()));
        }
        Ok(Self {
            label: label.to_string(),
            identifier,
        })
    }

    /// Parse a `label|identifier` line.
    ///
    /// The line is split at the first delimiter; everything after it is the
    /// identifier.
    pub fn parse_line(line: &str) -> Result<Self> {
        let (label, code) = line
            .split_once(RECORD_DELIMITER)
            .ok_or_else(|| CoreError::InvalidRecord(format!("missing delimiter in '{line}'")))?;
        let identifier = FundCode::new(code)?;
        Self::new(label, identifier)
    }

    /// Format as a store line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.label, RECORD_DELIMITER, self.identifier)
    }
}

impl fmt::Display for TrackedFund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_code_trims_whitespace() {
        let code = FundCode::new("  001186\n").unwrap();
        assert_eq!(code.as_str(), "001186");
        assert_eq!(code, "001186");
    }

    #[test]
    fn test_fund_code_rejects_delimiter_and_blank() {
        assert!(FundCode::new("").is_err());
        assert!(FundCode::new("   ").is_err());
        assert!(FundCode::new("00|1186").is_err());
        assert!(FundCode::new("001 186").is_err());
    }

    #[test]
    fn test_parse_line_splits_at_first_delimiter() {
        let fund = TrackedFund::parse_line("富国文体健康|001186").unwrap();
        assert_eq!(fund.label, "富国文体健康");
        assert_eq!(fund.identifier, "001186");
    }

    #[test]
    fn test_parse_line_tolerates_crlf() {
        let fund = TrackedFund::parse_line("Growth|161725\r").unwrap();
        assert_eq!(fund.identifier, "161725");
    }

    #[test]
    fn test_parse_line_without_delimiter_fails() {
        let err = TrackedFund::parse_line("161725").unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord(_)));
    }

    #[test]
    fn test_parse_line_with_extra_delimiter_rejects_identifier() {
        // "a|b|c" puts "b|c" in the identifier slot.
        let err = TrackedFund::parse_line("a|b|c").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFundCode(_)));
    }

    #[test]
    fn test_label_validation() {
        let code = FundCode::new("001186").unwrap();
        assert!(TrackedFund::new("", code.clone()).is_err());
        assert!(TrackedFund::new("a|b", code.clone()).is_err());
        assert!(TrackedFund::new("line\nbreak", code.clone()).is_err());
        assert!(TrackedFund::new("Index fund", code).is_ok());
    }

    #[test]
    fn test_to_line_round_trips() {
        let fund = TrackedFund::new("Index", FundCode::new("110020").unwrap()).unwrap();
        assert_eq!(fund.to_line(), "Index|110020");
        assert_eq!(TrackedFund::parse_line(&fund.to_line()).unwrap(), fund);
    }

    #[test]
    fn test_fund_code_serde_validates() {
        let ok: FundCode = serde_json::from_str("\"001186\"").unwrap();
        assert_eq!(ok, "001186");
        assert!(serde_json::from_str::<FundCode>("\"a|b\"").is_err());
    }
}
