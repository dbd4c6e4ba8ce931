//! Fetches a rate series from the remote provider, falling back to the
//! bundled dataset once the retry budget is spent.
use crate::core::error::{FxError, Result};
use crate::core::rates::{FetchedRates, RateSeriesProvider};
use crate::providers::{FallbackDataset, RetryPolicy, with_retry};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct RateFetcher {
    provider: Arc<dyn RateSeriesProvider>,
    fallback: FallbackDataset,
    retry: RetryPolicy,
}

impl RateFetcher {
    pub fn new(
        provider: Arc<dyn RateSeriesProvider>,
        fallback: FallbackDataset,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            fallback,
            retry,
        }
    }

    #[instrument(name = "RateFetch", skip(self))]
    pub async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<FetchedRates> {
        if start > end {
            return Err(FxError::InvalidInput(format!(
                "Start date {start} must not be after end date {end}"
            )));
        }

        let remote = with_retry(
            self.retry,
            || self.provider.fetch_series(start, end),
            FxError::is_transient,
        )
        .await;

        match remote {
            Ok(series) => {
                let series = series.within(start, end);
                if !series.is_empty() {
                    info!(points = series.len(), "Using live rates");
                    return Ok(FetchedRates::Api(series));
                }
                debug!("Remote API returned no rates in range, checking fallback dataset");
            }
            Err(e) => {
                warn!(error = %e, "Remote rate fetch failed, using fallback dataset");
            }
        }

        let series = self.fallback.range(start, end);
        if series.is_empty() {
            return Err(FxError::EmptyRange { start, end });
        }
        info!(points = series.len(), "Using fallback rates");
        Ok(FetchedRates::Fallback(series))
    }

    pub async fn check_reachability(&self) -> bool {
        self.provider.is_reachable().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{RateSeries, RateSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    enum Behaviour {
        Fail,
        Succeed(RateSeries),
        FailThenSucceed(usize, RateSeries),
    }

    struct MockProvider {
        behaviour: Behaviour,
        call_count: AtomicUsize,
    }

    impl MockProvider {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                call_count: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSeriesProvider for MockProvider {
        async fn fetch_series(&self, _start: NaiveDate, _end: NaiveDate) -> Result<RateSeries> {
            let n = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
            match &self.behaviour {
                Behaviour::Fail => Err(FxError::Transient("connection reset".to_string())),
                Behaviour::Succeed(series) => Ok(series.clone()),
                Behaviour::FailThenSucceed(failures, series) => {
                    if n <= *failures {
                        Err(FxError::Transient("HTTP error: 502".to_string()))
                    } else {
                        Ok(series.clone())
                    }
                }
            }
        }

        async fn is_reachable(&self) -> bool {
            !matches!(self.behaviour, Behaviour::Fail)
        }
    }

    fn live_series() -> RateSeries {
        RateSeries::new(vec![
            (date("2025-01-02"), 1.0321),
            (date("2025-01-03"), 1.0299),
        ])
        .unwrap()
    }

    fn fetcher(provider: Arc<MockProvider>) -> RateFetcher {
        RateFetcher::new(
            provider,
            FallbackDataset::bundled().unwrap(),
            RetryPolicy::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_rates_are_tagged_api() {
        let provider = MockProvider::new(Behaviour::Succeed(live_series()));
        let fetched = fetcher(provider.clone())
            .fetch(date("2025-01-01"), date("2025-01-03"))
            .await
            .unwrap();

        assert_eq!(fetched.source(), RateSource::Api);
        assert_eq!(fetched.series(), &live_series());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_after_three_transient_failures() {
        let provider = MockProvider::new(Behaviour::Fail);
        let start = Instant::now();

        let fetched = fetcher(provider.clone())
            .fetch(date("2025-01-01"), date("2025-01-03"))
            .await
            .unwrap();

        assert_eq!(fetched.source(), RateSource::Fallback);
        assert_eq!(fetched.series().len(), 3);
        assert_eq!(provider.calls(), 3);
        // 1s + 2s between the three attempts.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_within_retry_budget() {
        let provider = MockProvider::new(Behaviour::FailThenSucceed(2, live_series()));
        let fetched = fetcher(provider.clone())
            .fetch(date("2025-01-01"), date("2025-01-03"))
            .await
            .unwrap();

        assert_eq!(fetched.source(), RateSource::Api);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reversed_range_makes_no_remote_call() {
        let provider = MockProvider::new(Behaviour::Succeed(live_series()));
        let result = fetcher(provider.clone())
            .fetch(date("2025-01-05"), date("2025-01-01"))
            .await;

        assert!(matches!(result, Err(FxError::InvalidInput(_))));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_range_in_both_sources() {
        let provider = MockProvider::new(Behaviour::Succeed(RateSeries::default()));
        let result = fetcher(provider.clone())
            .fetch(date("2019-03-01"), date("2019-03-31"))
            .await;

        assert!(matches!(result, Err(FxError::EmptyRange { .. })));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_api_result_uses_fallback() {
        let provider = MockProvider::new(Behaviour::Succeed(RateSeries::default()));
        let fetched = fetcher(provider)
            .fetch(date("2025-01-06"), date("2025-01-08"))
            .await
            .unwrap();

        assert_eq!(fetched.source(), RateSource::Fallback);
        assert_eq!(fetched.series().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_api_points_outside_range_are_dropped() {
        let provider = MockProvider::new(Behaviour::Succeed(live_series()));
        let fetched = fetcher(provider)
            .fetch(date("2025-01-03"), date("2025-01-03"))
            .await
            .unwrap();

        assert_eq!(fetched.series().len(), 1);
        assert_eq!(fetched.series().first(), Some(&(date("2025-01-03"), 1.0299)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_fetch_abandons_pending_retries() {
        let provider = MockProvider::new(Behaviour::Fail);
        let fetcher = fetcher(provider.clone());

        let result = tokio::time::timeout(
            Duration::from_millis(500),
            fetcher.fetch(date("2025-01-01"), date("2025-01-03")),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(provider.calls(), 1);

        // Well past the whole backoff schedule; nothing keeps retrying.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_check_reachability_delegates_to_provider() {
        assert!(
            fetcher(MockProvider::new(Behaviour::Succeed(live_series())))
                .check_reachability()
                .await
        );
        assert!(
            !fetcher(MockProvider::new(Behaviour::Fail))
                .check_reachability()
                .await
        );
    }
}
