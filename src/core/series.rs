//! Rate series abstractions and core types

use crate::core::maturity::MaturityKey;
use crate::core::range::DateRange;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Display;

/// One decoded `(date, rate)` row of a response payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub value: f64,
}

impl RawObservation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Observations of a single maturity, ascending by date with unique dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    observations: Vec<RawObservation>,
}

impl Series {
    /// Sorts by date. For duplicate dates the last occurrence is kept.
    pub fn from_observations(mut observations: Vec<RawObservation>) -> Self {
        observations.reverse();
        observations.sort_by_key(|obs| obs.date);
        observations.dedup_by_key(|obs| obs.date);
        Self { observations }
    }

    pub fn observations(&self) -> &[RawObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |obs| obs.date)
            .ok()
            .map(|idx| self.observations[idx].value)
    }
}

/// Why a maturity produced no series.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// The service answered with a non-OK status code.
    Status(u16),
    /// No response was received.
    Transport(String),
    /// The payload could not be decoded.
    Malformed(String),
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "{code}"),
            FetchFailure::Transport(msg) => write!(f, "request failed ({msg})"),
            FetchFailure::Malformed(msg) => write!(f, "malformed response ({msg})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResult {
    Success(Series),
    Failure(FetchFailure),
}

impl SeriesResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SeriesResult::Success(_))
    }
}

#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Retrieves one maturity's observations for the range. Never fails:
    /// every problem is reported as a [`SeriesResult::Failure`].
    async fn fetch_series(&self, maturity: MaturityKey, range: &DateRange) -> SeriesResult;
}
