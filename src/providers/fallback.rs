//! Static EUR→USD dataset used when the remote API cannot be reached.

use super::frankfurter::TimeSeriesResponse;
use crate::core::error::{FxError, Result};
use crate::core::rates::RateSeries;
use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

const BUNDLED_DATASET: &str = include_str!("../../data/sample_fx.json");

#[derive(Debug, Clone)]
pub struct FallbackDataset {
    series: RateSeries,
}

impl FallbackDataset {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FxError::Fallback(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!("Loaded fallback dataset from {}", path.display());
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let data: TimeSeriesResponse = serde_json::from_str(text)
            .map_err(|e| FxError::Fallback(format!("Failed to parse dataset: {e}")))?;
        Ok(Self {
            series: data.into_series("USD"),
        })
    }

    /// Rates with `start <= date <= end`, possibly empty.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> RateSeries {
        self.series.within(start, end)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let dataset = FallbackDataset::bundled().unwrap();
        assert!(!dataset.is_empty());

        let january = dataset.range(date("2025-01-01"), date("2025-01-03"));
        assert_eq!(january.len(), 3);
        assert_eq!(january.first(), Some(&(date("2025-01-01"), 1.0352)));
        assert!(january.iter().all(|(_, rate)| *rate > 0.0));
    }

    #[test]
    fn test_range_outside_coverage_is_empty() {
        let dataset = FallbackDataset::bundled().unwrap();
        assert!(dataset
            .range(date("2019-01-01"), date("2019-12-31"))
            .is_empty());
    }

    #[test]
    fn test_load_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"rates": {"2024-06-03": {"USD": 1.0872}, "2024-06-04": {"USD": 1.0879}}}"#,
        )
        .unwrap();

        let dataset = FallbackDataset::load_from_path(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_missing_file_is_fallback_error() {
        let result = FallbackDataset::load_from_path("/nonexistent/sample_fx.json");
        assert!(matches!(result, Err(FxError::Fallback(_))));
    }
}
