//! Decoding of the data service's CSV payload.
//!
//! The payload is a fixed metadata preamble followed by an ordinary CSV table.
//! Only the period and observation columns are read; every other column is
//! ignored. Rows without a usable observation are dropped rather than
//! coerced to zero.

use crate::core::series::{RawObservation, Series};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

/// Metadata lines preceding the CSV header.
pub const PREAMBLE_LINES: usize = 5;

const DATE_COLUMN: &str = "TIME_PERIOD";
const VALUE_COLUMN: &str = "OBS_VALUE";

/// Decodes a complete response body into a series.
pub fn decode(body: &str) -> Result<Series> {
    let table = strip_preamble(body).ok_or_else(|| {
        anyhow!("payload shorter than the {PREAMBLE_LINES}-line preamble")
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(table.as_bytes());

    let headers = reader.headers().context("failed to read header row")?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("missing header row");
    }
    let date_idx = column_index(&headers, DATE_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut observations = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Header is line 1 of the table.
        let line = PREAMBLE_LINES + idx + 2;
        let record = record.with_context(|| format!("invalid CSV on line {line}"))?;

        let period = record.get(date_idx).unwrap_or_default();
        let date = parse_period(period)
            .with_context(|| format!("unparsable {DATE_COLUMN} '{period}' on line {line}"))?;

        match parse_value(record.get(value_idx).unwrap_or_default()) {
            Some(value) => observations.push(RawObservation::new(date, value)),
            None => debug!(%date, line, "Skipping row without observation value"),
        }
    }

    Ok(Series::from_observations(observations))
}

fn strip_preamble(body: &str) -> Option<&str> {
    let mut rest = body;
    for _ in 0..PREAMBLE_LINES {
        let end = rest.find('\n')?;
        rest = &rest[end + 1..];
    }
    Some(rest)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("missing {name} column"))
}

/// Accepts daily (`2024-01-15`) and monthly (`2024-01`) periods. A monthly
/// period maps to the first day of the month.
fn parse_period(period: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(period, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d"))
        .map_err(Into::into)
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
