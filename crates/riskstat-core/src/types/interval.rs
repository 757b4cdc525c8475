//! Sampling interval definitions for price fetches.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Sampling interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// One observation per trading day
    #[serde(rename = "1d")]
    #[default]
    Daily,
    /// Last observation of each ISO week
    #[serde(rename = "1wk")]
    Weekly,
    /// Last observation of each calendar month
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// Key identifying the bucket a date falls into.
    ///
    /// Two dates share a key exactly when they belong to the same
    /// day, ISO week or month, depending on the interval.
    pub fn bucket(&self, date: NaiveDate) -> (i32, u32) {
        match self {
            Interval::Daily => (date.year(), date.ordinal()),
            Interval::Weekly => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            Interval::Monthly => (date.year(), date.month()),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Interval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "day" | "daily" => Ok(Interval::Daily),
            "1wk" | "1w" | "week" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "month" | "monthly" => Ok(Interval::Monthly),
            _ => Err(DataError::InvalidInterval(s.to_string())),
        }
    }
}
