pub mod chart;
pub mod prompt;
pub mod setup;
pub mod table;
pub mod ui;

use crate::core::fetch::fetch_order;
use crate::core::{DateRange, FetchFailure, MaturityKey, RateOutcome, SeriesProvider, collect_rates};

pub fn chart_title(range: &DateRange) -> String {
    format!("Euribor rates {range}")
}

pub fn unavailable_notice(range: &DateRange) -> String {
    format!("No data available for {range}.")
}

pub fn failure_message(maturity: MaturityKey, failure: &FetchFailure) -> String {
    format!("Failed to fetch {maturity} data: {failure}")
}

/// Runs the fetch-and-align pipeline behind a progress bar and reports
/// failed maturities on stderr.
pub async fn fetch_rates(
    provider: &(dyn SeriesProvider + Send + Sync),
    maturities: &[MaturityKey],
    range: &DateRange,
) -> RateOutcome {
    let pb = ui::new_progress_bar(fetch_order(maturities).len() as u64, true);
    pb.set_message("Fetching rates...");
    let outcome = collect_rates(provider, maturities, range, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    for (maturity, failure) in outcome.failures() {
        eprintln!(
            "{}",
            ui::style_text(&failure_message(*maturity, failure), ui::StyleType::Error)
        );
    }
    outcome
}
