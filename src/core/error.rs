//! Error kinds surfaced by the rate fetcher and summary calculator.

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum FxError {
    /// Malformed or inconsistent input, e.g. a reversed date range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Neither the remote API nor the fallback dataset had rates in range.
    #[error("No rate data available between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    /// A remote call failed in a way that is worth retrying.
    #[error("Transient fetch error: {0}")]
    Transient(String),

    /// The fallback dataset could not be read or parsed.
    #[error("Fallback dataset error: {0}")]
    Fallback(String),
}

impl FxError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FxError::Transient(_))
    }
}

impl From<reqwest::Error> for FxError {
    fn from(e: reqwest::Error) -> Self {
        FxError::Transient(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
