use crate::core::align::{AlignedTable, align};
use crate::core::fetch::{fetch_all, partition};
use crate::core::maturity::MaturityKey;
use crate::core::range::DateRange;
use crate::core::series::{FetchFailure, SeriesProvider};
use tracing::info;

/// Result of a full fetch-and-align run.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    /// At least one row was aligned. `failures` lists maturities left out.
    Available {
        table: AlignedTable,
        failures: Vec<(MaturityKey, FetchFailure)>,
    },
    /// No maturity succeeded, or none had observations in the range.
    Unavailable {
        failures: Vec<(MaturityKey, FetchFailure)>,
    },
}

impl RateOutcome {
    pub fn failures(&self) -> &[(MaturityKey, FetchFailure)] {
        match self {
            RateOutcome::Available { failures, .. } | RateOutcome::Unavailable { failures } => {
                failures
            }
        }
    }

    pub fn table(&self) -> Option<&AlignedTable> {
        match self {
            RateOutcome::Available { table, .. } => Some(table),
            RateOutcome::Unavailable { .. } => None,
        }
    }
}

pub async fn collect_rates(
    provider: &(dyn SeriesProvider + Send + Sync),
    maturities: &[MaturityKey],
    range: &DateRange,
    update_callback: &(dyn Fn()),
) -> RateOutcome {
    let results = fetch_all(provider, maturities, range, update_callback).await;
    let (series, failures) = partition(results);

    match align(&series) {
        Some(table) if !table.is_empty() => {
            info!(
                rows = table.len(),
                failed = failures.len(),
                "Rates available for {}",
                range
            );
            RateOutcome::Available { table, failures }
        }
        _ => {
            info!(failed = failures.len(), "No rates available for {}", range);
            RateOutcome::Unavailable { failures }
        }
    }
}
