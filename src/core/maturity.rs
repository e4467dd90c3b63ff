//! Euribor maturities

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Tenor of a Euribor quote.
///
/// The variant order is the canonical fetch and column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum MaturityKey {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "12M")]
    TwelveMonths,
}

impl MaturityKey {
    pub const ALL: [MaturityKey; 4] = [
        MaturityKey::OneMonth,
        MaturityKey::ThreeMonths,
        MaturityKey::SixMonths,
        MaturityKey::TwelveMonths,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaturityKey::OneMonth => "1M",
            MaturityKey::ThreeMonths => "3M",
            MaturityKey::SixMonths => "6M",
            MaturityKey::TwelveMonths => "12M",
        }
    }
}

impl Display for MaturityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MaturityKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(MaturityKey::OneMonth),
            "3M" => Ok(MaturityKey::ThreeMonths),
            "6M" => Ok(MaturityKey::SixMonths),
            "12M" => Ok(MaturityKey::TwelveMonths),
            _ => Err(anyhow::anyhow!("Invalid maturity: {}", s)),
        }
    }
}
