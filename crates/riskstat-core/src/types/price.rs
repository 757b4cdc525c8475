//! Price observation types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{DateRange, Interval};
use crate::error::DataError;

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Observed (adjusted) price
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Create a price point at midnight UTC of the given date.
    pub fn on(date: NaiveDate, price: f64) -> Self {
        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { timestamp, price }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Get the calendar date of the observation.
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }
}

/// Ordered price history for one symbol.
///
/// Timestamps are strictly increasing and every price is positive and
/// finite. An empty series is valid and signals that a source had no
/// rows for the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    points: Vec<PricePoint>,
}

/// Unchecked wire form of [`PriceSeries`].
#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = DataError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.points)
    }
}

impl PriceSeries {
    /// Create a validated price series.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DataError> {
        let symbol = symbol.into();

        if let Some(bad) = points.iter().find(|p| !(p.price.is_finite() && p.price > 0.0)) {
            return Err(DataError::InvalidSeries(format!(
                "{}: price {} at {} is not a positive number",
                symbol,
                bad.price,
                bad.date()
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(DataError::InvalidSeries(format!(
                "{}: timestamps not strictly increasing at {}",
                symbol,
                pair[1].date()
            )));
        }

        Ok(Self { symbol, points })
    }

    /// Create an empty series.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    /// Get the number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get all observations.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Extract prices as a vector.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Get the first observation.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Get the last observation.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Get an iterator over the observations.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    /// Keep only the observations whose date falls inside `range`.
    pub fn within(self, range: &DateRange) -> Self {
        Self {
            symbol: self.symbol,
            points: self
                .points
                .into_iter()
                .filter(|p| range.contains(p.date()))
                .collect(),
        }
    }

    /// Downsample to `interval`, keeping the last observation of each bucket.
    pub fn resample(self, interval: Interval) -> Self {
        if interval == Interval::Daily {
            return self;
        }

        let mut last_in_bucket: HashMap<(i32, u32), usize> = HashMap::new();
        for (i, p) in self.points.iter().enumerate() {
            last_in_bucket.insert(interval.bucket(p.date()), i);
        }

        let mut keep: Vec<usize> = last_in_bucket.into_values().collect();
        keep.sort_unstable();

        Self {
            points: keep.into_iter().map(|i| self.points[i]).collect(),
            symbol: self.symbol,
        }
    }
}
