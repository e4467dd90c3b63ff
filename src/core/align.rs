//! Full-outer-join alignment of per-maturity series into one table.
use crate::core::maturity::MaturityKey;
use crate::core::series::Series;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// One date of the aligned table. Every column of the table has an entry,
/// `None` when that maturity has no observation on this date.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub values: BTreeMap<MaturityKey, Option<f64>>,
}

impl AlignedRow {
    pub fn value(&self, key: MaturityKey) -> Option<f64> {
        self.values.get(&key).copied().flatten()
    }
}

/// Date-indexed table combining every successfully fetched series.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    columns: Vec<MaturityKey>,
    rows: Vec<AlignedRow>,
}

impl AlignedTable {
    pub fn columns(&self) -> &[MaturityKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, date: NaiveDate, key: MaturityKey) -> Option<f64> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .and_then(|idx| self.rows[idx].value(key))
    }

    /// Points of one column where a value is present, in date order.
    pub fn series(&self, key: MaturityKey) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.value(key).map(|v| (row.date, v)))
            .collect()
    }

    /// Smallest and largest value present anywhere in the table.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .flat_map(|row| row.values.values().filter_map(|v| *v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Join accumulator: rows in join order plus a date index into them.
struct Accumulator {
    columns: Vec<MaturityKey>,
    rows: Vec<AlignedRow>,
    index: HashMap<NaiveDate, usize>,
}

impl Accumulator {
    fn seed(key: MaturityKey, series: &Series) -> Self {
        let mut acc = Accumulator {
            columns: Vec::new(),
            rows: Vec::new(),
            index: HashMap::new(),
        };
        acc.outer_join(key, series);
        acc
    }

    /// Adds `series` as column `key`. Dates new to the table get `None` for
    /// every existing column; existing dates missing from `series` get `None`
    /// for `key`.
    fn outer_join(&mut self, key: MaturityKey, series: &Series) {
        for row in &mut self.rows {
            row.values.insert(key, series.value_at(row.date));
        }

        for obs in series.observations() {
            if self.index.contains_key(&obs.date) {
                continue;
            }
            let mut values: BTreeMap<MaturityKey, Option<f64>> =
                self.columns.iter().map(|c| (*c, None)).collect();
            values.insert(key, Some(obs.value));
            self.index.insert(obs.date, self.rows.len());
            self.rows.push(AlignedRow {
                date: obs.date,
                values,
            });
        }

        self.columns.push(key);
    }

    fn finish(mut self) -> AlignedTable {
        self.rows.sort_by_key(|row| row.date);
        AlignedTable {
            columns: self.columns,
            rows: self.rows,
        }
    }
}

/// Merges all series into one table sorted by date ascending.
///
/// Returns `None` when there is nothing to align. An `AlignedTable` is
/// always built from at least one series, though that series may be empty.
pub fn align(series: &BTreeMap<MaturityKey, Series>) -> Option<AlignedTable> {
    let mut iter = series.iter();
    let (first_key, first_series) = iter.next()?;

    let mut acc = Accumulator::seed(*first_key, first_series);
    for (key, s) in iter {
        acc.outer_join(*key, s);
    }

    let table = acc.finish();
    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "Aligned series"
    );
    Some(table)
}
