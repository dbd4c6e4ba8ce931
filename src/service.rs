//! Request-level operations shared by the HTTP server and the CLI.
use crate::core::config::AppConfig;
use crate::core::error::Result;
use crate::core::rates::RateSeriesProvider;
use crate::core::summary::{self, BreakdownMode, SummaryResult};
use crate::fetcher::RateFetcher;
use crate::providers::{FallbackDataset, FrankfurterProvider};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub api_reachable: bool,
}

pub struct FxService {
    fetcher: RateFetcher,
}

impl FxService {
    pub fn new(fetcher: RateFetcher) -> Self {
        Self { fetcher }
    }

    /// Wires the Frankfurter provider and the configured fallback dataset.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let frankfurter = &config.providers.frankfurter;
        let provider: Arc<dyn RateSeriesProvider> = Arc::new(FrankfurterProvider::new(
            &frankfurter.base_url,
            Duration::from_secs(frankfurter.timeout_secs),
            Duration::from_secs(frankfurter.probe_timeout_secs),
        ));

        let fallback = match &config.fallback_path {
            Some(path) => FallbackDataset::load_from_path(path)
                .with_context(|| format!("Failed to load fallback dataset: {path}"))?,
            None => FallbackDataset::bundled().context("Failed to load bundled dataset")?,
        };
        debug!(points = fallback.len(), "Fallback dataset ready");

        Ok(Self::new(RateFetcher::new(provider, fallback, config.retry)))
    }

    pub async fn summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        mode: BreakdownMode,
    ) -> Result<SummaryResult> {
        let rates = self.fetcher.fetch(start, end).await?;
        summary::summarize(&rates, mode)
    }

    /// Reports `Degraded` when the remote API is unreachable; summaries are
    /// still served from the fallback dataset in that state.
    pub async fn health(&self) -> HealthReport {
        let api_reachable = self.fetcher.check_reachability().await;
        HealthReport {
            status: if api_reachable {
                HealthStatus::Ok
            } else {
                HealthStatus::Degraded
            },
            api_reachable,
        }
    }
}
