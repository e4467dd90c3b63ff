//! Sequential retrieval of every configured maturity.
use crate::core::maturity::MaturityKey;
use crate::core::range::DateRange;
use crate::core::series::{FetchFailure, Series, SeriesProvider, SeriesResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Maturities in the order they are fetched: canonical order, each once.
pub fn fetch_order(maturities: &[MaturityKey]) -> Vec<MaturityKey> {
    let mut ordered = maturities.to_vec();
    ordered.sort();
    ordered.dedup();
    ordered
}

/// Fetches each maturity in turn and records one [`SeriesResult`] per key.
///
/// Keys are fetched in canonical order, one request at a time; a failure is
/// logged and the loop moves on. `update_callback` fires after every key.
pub async fn fetch_all(
    provider: &(dyn SeriesProvider + Send + Sync),
    maturities: &[MaturityKey],
    range: &DateRange,
    update_callback: &(dyn Fn()),
) -> BTreeMap<MaturityKey, SeriesResult> {
    let mut results = BTreeMap::new();
    for maturity in fetch_order(maturities) {
        debug!(%maturity, %range, "Fetching series");
        let result = provider.fetch_series(maturity, range).await;
        match &result {
            SeriesResult::Success(series) => {
                debug!(%maturity, observations = series.len(), "Fetched series");
            }
            SeriesResult::Failure(failure) => {
                warn!(%maturity, %failure, "Failed to fetch {} data: {}", maturity, failure);
            }
        }
        results.insert(maturity, result);
        update_callback();
    }
    results
}

/// Splits fetch results into the series to align and the failures to report.
pub fn partition(
    results: BTreeMap<MaturityKey, SeriesResult>,
) -> (
    BTreeMap<MaturityKey, Series>,
    Vec<(MaturityKey, FetchFailure)>,
) {
    let mut series = BTreeMap::new();
    let mut failures = Vec::new();
    for (maturity, result) in results {
        match result {
            SeriesResult::Success(s) => {
                series.insert(maturity, s);
            }
            SeriesResult::Failure(f) => failures.push((maturity, f)),
        }
    }
    (series, failures)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::series::RawObservation;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned provider that records the order in which maturities are requested.
    pub(crate) struct StubProvider {
        responses: HashMap<MaturityKey, SeriesResult>,
        pub(crate) calls: Mutex<Vec<MaturityKey>>,
    }

    impl StubProvider {
        pub(crate) fn new(responses: Vec<(MaturityKey, SeriesResult)>) -> Self {
            Self {
                responses: responses.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SeriesProvider for StubProvider {
        async fn fetch_series(&self, maturity: MaturityKey, _range: &DateRange) -> SeriesResult {
            self.calls.lock().unwrap().push(maturity);
            self.responses
                .get(&maturity)
                .cloned()
                .unwrap_or(SeriesResult::Failure(FetchFailure::Status(404)))
        }
    }

    pub(crate) fn series(points: &[(&str, f64)]) -> Series {
        Series::from_observations(
            points
                .iter()
                .map(|(d, v)| {
                    RawObservation::new(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(), *v)
                })
                .collect(),
        )
    }

    fn range() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-03").unwrap()
    }

    #[tokio::test]
    async fn test_fetches_in_canonical_order_once_per_key() {
        let provider = StubProvider::new(vec![]);
        let requested = [
            MaturityKey::TwelveMonths,
            MaturityKey::OneMonth,
            MaturityKey::OneMonth,
            MaturityKey::SixMonths,
        ];

        let results = fetch_all(&provider, &requested, &range(), &|| ()).await;

        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec![
                MaturityKey::OneMonth,
                MaturityKey::SixMonths,
                MaturityKey::TwelveMonths
            ]
        );
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_progress_ticks_once_per_distinct_maturity() {
        let provider = StubProvider::new(vec![]);
        let requested = [
            MaturityKey::OneMonth,
            MaturityKey::OneMonth,
            MaturityKey::ThreeMonths,
        ];
        let ticks = Mutex::new(0);

        fetch_all(&provider, &requested, &range(), &|| *ticks.lock().unwrap() += 1).await;

        assert_eq!(fetch_order(&requested).len(), 2);
        assert_eq!(*ticks.lock().unwrap(), fetch_order(&requested).len());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_remaining_fetches() {
        let provider = StubProvider::new(vec![
            (
                MaturityKey::OneMonth,
                SeriesResult::Failure(FetchFailure::Status(500)),
            ),
            (
                MaturityKey::ThreeMonths,
                SeriesResult::Success(series(&[("2024-01-02", 3.95)])),
            ),
        ]);
        let progress = Mutex::new(0);

        let results = fetch_all(
            &provider,
            &[MaturityKey::OneMonth, MaturityKey::ThreeMonths],
            &range(),
            &|| *progress.lock().unwrap() += 1,
        )
        .await;

        assert_eq!(*progress.lock().unwrap(), 2);
        assert_eq!(
            results[&MaturityKey::OneMonth],
            SeriesResult::Failure(FetchFailure::Status(500))
        );
        assert!(results[&MaturityKey::ThreeMonths].is_success());

        let (ok, failed) = partition(results);
        assert_eq!(ok.keys().copied().collect::<Vec<_>>(), vec![MaturityKey::ThreeMonths]);
        assert_eq!(failed, vec![(MaturityKey::OneMonth, FetchFailure::Status(500))]);
    }
}
