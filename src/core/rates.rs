//! Rate series types and the provider abstraction for remote rate sources.

use super::error::{FxError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// EUR→USD rates ordered by date, with no duplicate dates.
///
/// Rate positivity is not checked here. Series read from the remote API or
/// the fallback dataset only carry positive rates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl RateSeries {
    /// Builds a series from unordered points. Duplicate dates are rejected.
    pub fn new(mut points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        points.sort_by_key(|(date, _)| *date);
        if let Some(pair) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(FxError::InvalidInput(format!(
                "Duplicate rate for date {}",
                pair[0].0
            )));
        }
        Ok(Self { points })
    }

    /// Returns the subset of points with `start <= date <= end`.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> RateSeries {
        RateSeries {
            points: self
                .points
                .iter()
                .filter(|(date, _)| *date >= start && *date <= end)
                .copied()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, f64)> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&(NaiveDate, f64)> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&(NaiveDate, f64)> {
        self.points.last()
    }
}

impl From<BTreeMap<NaiveDate, f64>> for RateSeries {
    fn from(map: BTreeMap<NaiveDate, f64>) -> Self {
        // BTreeMap keys are already unique and sorted.
        Self {
            points: map.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Api,
    Fallback,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSource::Api => "api",
                RateSource::Fallback => "fallback",
            }
        )
    }
}

/// A rate series tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRates {
    Api(RateSeries),
    Fallback(RateSeries),
}

impl FetchedRates {
    pub fn source(&self) -> RateSource {
        match self {
            FetchedRates::Api(_) => RateSource::Api,
            FetchedRates::Fallback(_) => RateSource::Fallback,
        }
    }

    pub fn series(&self) -> &RateSeries {
        match self {
            FetchedRates::Api(series) | FetchedRates::Fallback(series) => series,
        }
    }
}

/// A remote source of daily EUR→USD rates.
#[async_trait]
pub trait RateSeriesProvider: Send + Sync {
    /// Performs a single attempt to fetch rates for `[start, end]`.
    async fn fetch_series(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries>;

    /// Lightweight connectivity probe.
    async fn is_reachable(&self) -> bool;
}
