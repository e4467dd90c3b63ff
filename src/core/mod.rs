//! Core fetch-and-align logic, free of terminal I/O

pub mod align;
pub mod config;
pub mod fetch;
pub mod log;
pub mod maturity;
pub mod pipeline;
pub mod range;
pub mod series;

// Re-export main types for cleaner imports
pub use align::{AlignedRow, AlignedTable};
pub use maturity::MaturityKey;
pub use pipeline::{RateOutcome, collect_rates};
pub use range::DateRange;
pub use series::{FetchFailure, RawObservation, Series, SeriesProvider, SeriesResult};
