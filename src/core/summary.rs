//! Day-over-day changes and aggregate statistics over a rate series.
use super::error::{FxError, Result};
use super::rates::{FetchedRates, RateSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const PRECISION: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownMode {
    #[default]
    Day,
    None,
}

impl Display for BreakdownMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BreakdownMode::Day => "day",
                BreakdownMode::None => "none",
            }
        )
    }
}

impl FromStr for BreakdownMode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(BreakdownMode::Day),
            "none" => Ok(BreakdownMode::None),
            _ => Err(FxError::InvalidInput(format!(
                "Invalid breakdown mode: {s} (expected 'day' or 'none')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub rate: f64,
    /// `None` for the first day of the series.
    pub pct_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub start_rate: f64,
    pub end_rate: f64,
    pub total_pct_change: f64,
    pub mean_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub breakdown: Option<Vec<DailyEntry>>,
    pub totals: Totals,
    pub source: RateSource,
}

fn round4(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Percentage change from `previous` to `current`. A zero denominator yields 0.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round4((current - previous) / previous * 100.0)
}

/// Builds the per-day breakdown and totals for a fetched series.
///
/// The source tag is carried through unchanged from `rates`. An empty series
/// is rejected rather than producing zeroed totals.
pub fn summarize(rates: &FetchedRates, mode: BreakdownMode) -> Result<SummaryResult> {
    let series = rates.series();
    let (Some(&(_, start_rate)), Some(&(_, end_rate))) = (series.first(), series.last()) else {
        return Err(FxError::InvalidInput(
            "Cannot summarize an empty rate series".to_string(),
        ));
    };

    let mut breakdown = Vec::with_capacity(series.len());
    let mut previous: Option<f64> = None;
    let mut sum = 0.0;

    for &(date, rate) in series.iter() {
        sum += rate;
        breakdown.push(DailyEntry {
            date,
            rate: round4(rate),
            pct_change: previous.map(|prev| pct_change(rate, prev)),
        });
        previous = Some(rate);
    }

    let totals = Totals {
        start_rate: round4(start_rate),
        end_rate: round4(end_rate),
        total_pct_change: pct_change(end_rate, start_rate),
        mean_rate: round4(sum / series.len() as f64),
    };

    Ok(SummaryResult {
        breakdown: match mode {
            BreakdownMode::Day => Some(breakdown),
            BreakdownMode::None => None,
        },
        totals,
        source: rates.source(),
    })
}
