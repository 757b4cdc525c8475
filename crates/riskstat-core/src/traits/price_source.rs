//! Price source trait definition.

use crate::error::DataError;
use crate::types::{DateRange, Interval, PriceSeries};

/// Trait for historical price providers.
///
/// A fetch is one blocking call with no retry. A source that ran fine but
/// has no rows for the range returns an empty [`PriceSeries`]; anything
/// that prevented the lookup is a [`DataError`].
pub trait PriceSource {
    /// Fetch historical prices.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `range` - Half-open date range
    /// * `interval` - Sampling interval
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    fn fetch(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

impl<T: PriceSource + ?Sized> PriceSource for &T {
    fn fetch(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        (**self).fetch(symbol, range, interval)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
