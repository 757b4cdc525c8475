//! In-memory price source.

use riskstat_core::error::DataError;
use riskstat_core::traits::PriceSource;
use riskstat_core::types::{DateRange, Interval, PricePoint, PriceSeries};
use std::collections::HashMap;

/// Price source backed by series held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validated series under its symbol.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol.clone(), series);
    }

    /// Register raw points for `symbol`.
    pub fn with_points(
        mut self,
        symbol: &str,
        points: Vec<PricePoint>,
    ) -> Result<Self, DataError> {
        self.insert(PriceSeries::new(symbol, points)?);
        Ok(self)
    }

    /// Get the registered symbols.
    pub fn symbols(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }
}

impl PriceSource for InMemoryPriceSource {
    fn fetch(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
        Ok(series.clone().within(range).resample(interval))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(d: u32, price: f64) -> PricePoint {
        PricePoint::on(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), price)
    }

    #[test]
    fn test_fetch_known_symbol() {
        let source = InMemoryPriceSource::new()
            .with_points("SPY", vec![point(2, 100.0), point(3, 101.0), point(4, 102.0)])
            .unwrap();
        let range = DateRange::parse("2024-01-03", "2024-02-01").unwrap();

        let series = source.fetch("SPY", &range, Interval::Daily).unwrap();
        assert_eq!(series.prices(), vec![101.0, 102.0]);
        assert_eq!(source.symbols(), vec!["SPY"]);
    }

    #[test]
    fn test_empty_range_is_not_an_error() {
        let source = InMemoryPriceSource::new()
            .with_points("SPY", vec![point(2, 100.0)])
            .unwrap();
        let range = DateRange::parse("2023-01-01", "2023-02-01").unwrap();

        let series = source.fetch("SPY", &range, Interval::Daily).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_unknown_symbol() {
        let source = InMemoryPriceSource::new();
        let range = DateRange::parse("2024-01-01", "2024-02-01").unwrap();
        assert!(matches!(
            source.fetch("SPY", &range, Interval::Daily),
            Err(DataError::SymbolNotFound(_))
        ));
    }
}
