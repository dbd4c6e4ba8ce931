use crate::core::error::{FxError, Result};
use crate::core::rates::{RateSeries, RateSeriesProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";
const USER_AGENT: &str = "fxsummary/1.0";
const BASE_CURRENCY: &str = "EUR";
const TARGET_CURRENCY: &str = "USD";

/// Time-series payload shared by the Frankfurter API and the fallback file.
#[derive(Debug, Deserialize)]
pub(crate) struct TimeSeriesResponse {
    rates: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl TimeSeriesResponse {
    /// Keeps the dates that carry a positive rate for `currency`.
    pub(crate) fn into_series(self, currency: &str) -> RateSeries {
        let rates: BTreeMap<NaiveDate, f64> = self
            .rates
            .into_iter()
            .filter_map(|(date, mut quotes)| match quotes.remove(currency) {
                Some(rate) if rate > 0.0 => Some((date, rate)),
                Some(rate) => {
                    debug!("Non-positive {} rate {} for {}, skipping", currency, rate, date);
                    None
                }
                None => {
                    debug!("No {} rate reported for {}, skipping", currency, date);
                    None
                }
            })
            .collect();
        RateSeries::from(rates)
    }
}

pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
    probe_timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration, probe_timeout: Duration) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            probe_timeout,
        }
    }

    fn client() -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().user_agent(USER_AGENT).build()
    }
}

#[async_trait]
impl RateSeriesProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterFetch", skip(self))]
    async fn fetch_series(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries> {
        let url = format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url, start, end, BASE_CURRENCY, TARGET_CURRENCY
        );
        debug!("Requesting rate series from {}", url);

        let response = Self::client()?
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FxError::Transient(format!("Request error: {e} for URL: {url}")))?;

        if !response.status().is_success() {
            return Err(FxError::Transient(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        let data: TimeSeriesResponse = serde_json::from_str(&text).map_err(|e| {
            FxError::Transient(format!("Failed to parse JSON response from {url}: {e}"))
        })?;

        let series = data.into_series(TARGET_CURRENCY);
        debug!(points = series.len(), "Received rate series");
        Ok(series)
    }

    async fn is_reachable(&self) -> bool {
        let url = format!(
            "{}/latest?from={}&to={}",
            self.base_url, BASE_CURRENCY, TARGET_CURRENCY
        );
        let client = match Self::client() {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "Failed to build HTTP client for probe");
                return false;
            }
        };

        match client.get(&url).timeout(self.probe_timeout).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!(error = %e, "Reachability probe failed");
                false
            }
        }
    }
}
