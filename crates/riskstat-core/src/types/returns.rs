//! Return series derived from prices.

use serde::{Deserialize, Serialize};

use super::PriceSeries;
use crate::error::{RiskError, RiskResult};

/// Non-empty sequence of period returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Simple returns: `p[i] / p[i-1] - 1`.
    pub fn simple(prices: &PriceSeries) -> RiskResult<Self> {
        Self::derive(prices, |prev, curr| curr / prev - 1.0)
    }

    /// Log returns: `ln(p[i] / p[i-1])`.
    pub fn log(prices: &PriceSeries) -> RiskResult<Self> {
        Self::derive(prices, |prev, curr| (curr / prev).ln())
    }

    /// Wrap already-computed returns.
    pub fn from_values(values: Vec<f64>) -> RiskResult<Self> {
        if values.is_empty() {
            return Err(RiskError::EmptyReturns { prices: 0 });
        }
        if let Some(bad) = values.iter().find(|r| !r.is_finite()) {
            return Err(RiskError::InvalidParameter(format!(
                "return {} is not finite",
                bad
            )));
        }
        Ok(Self { values })
    }

    fn derive(prices: &PriceSeries, f: impl Fn(f64, f64) -> f64) -> RiskResult<Self> {
        if prices.len() < 2 {
            return Err(RiskError::EmptyReturns {
                prices: prices.len(),
            });
        }

        let values = prices
            .points()
            .windows(2)
            .map(|w| f(w[0].price, w[1].price))
            .collect();

        Ok(Self { values })
    }

    /// Get the number of returns.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false once constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the returns as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
