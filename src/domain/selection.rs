//! Selection key correlating artifacts that belong to one report run.

use std::fmt;

use crate::domain::error::ReportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKey {
    ticker: String,
    timestamp: String,
}

impl SelectionKey {
    /// Trims both parts and upper-cases the ticker. Parts that are empty or
    /// contain a path separator are rejected, since they end up in the
    /// output file name.
    pub fn new(ticker: &str, timestamp: &str) -> Result<Self, ReportError> {
        let ticker = validate_part("ticker", ticker)?.to_uppercase();
        let timestamp = validate_part("timestamp", timestamp)?.to_string();
        Ok(Self { ticker, timestamp })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Both the ticker and the timestamp occur somewhere in `file_name`.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.ticker) && file_name.contains(&self.timestamp)
    }

    /// `<TICKER>_<timestamp>.pdf`
    pub fn report_file_name(&self) -> String {
        format!("{}_{}.pdf", self.ticker, self.timestamp)
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.ticker, self.timestamp)
    }
}

/// An absent key selects everything.
pub fn is_selected(key: Option<&SelectionKey>, file_name: &str) -> bool {
    key.is_none_or(|k| k.matches(file_name))
}

fn validate_part<'a>(what: &str, raw: &'a str) -> Result<&'a str, ReportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReportError::InvalidSelection {
            reason: format!("{what} must not be empty"),
        });
    }
    if let Some(c) = trimmed.chars().find(|c| matches!(*c, '/' | '\\')) {
        return Err(ReportError::InvalidSelection {
            reason: format!("{what} {trimmed:?} must not contain {c:?}"),
        });
    }
    Ok(trimmed)
}
