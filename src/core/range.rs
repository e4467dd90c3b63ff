use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fmt::Display;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            bail!("Start date {start} is after end date {end}");
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` strings, rejecting bad input before any request is made.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start).context("Invalid start date")?;
        let end = parse_date(end).context("Invalid end date")?;
        Self::new(start, end)
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start_param(), self.end_param())
    }
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .with_context(|| format!("Expected YYYY-MM-DD, got '{input}'"))
}
