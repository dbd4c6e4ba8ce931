//! Core business logic abstractions

pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod summary;

// Re-export main types for cleaner imports
pub use error::{FxError, Result};
pub use rates::{FetchedRates, RateSeries, RateSeriesProvider, RateSource};
pub use summary::{BreakdownMode, DailyEntry, SummaryResult, Totals};
