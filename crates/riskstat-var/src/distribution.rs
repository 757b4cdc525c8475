//! Descriptive statistics of the log-return distribution.

use riskstat_core::error::{RiskError, RiskResult};
use riskstat_core::traits::PriceSource;
use riskstat_core::types::{DateRange, Interval, PriceSeries, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::statistics::{central_moment, mean, sample_std_dev};

/// Grid resolution for the KDE mode search.
pub const KDE_GRID_POINTS: usize = 2_000;

/// Shape of a return distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub symbol: String,
    /// Number of returns
    pub observations: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    /// Bias-corrected sample skewness
    pub skewness: f64,
    /// Fisher (excess) kurtosis, 0 for a normal distribution
    pub excess_kurtosis: f64,
    pub min: f64,
    pub max: f64,
    /// Peak of the Gaussian kernel density estimate
    pub mode: f64,
}

impl DistributionStats {
    /// Fetch prices from `source` and describe their log returns.
    pub fn fetch<S: PriceSource>(
        source: &S,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> RiskResult<Self> {
        let prices = source.fetch(symbol, range, interval)?;
        if prices.is_empty() {
            return Err(RiskError::DataUnavailable {
                symbol: symbol.to_string(),
                range: *range,
            });
        }
        Self::from_prices(&prices)
    }

    /// Compute statistics of the log returns of `prices`.
    pub fn from_prices(prices: &PriceSeries) -> RiskResult<Self> {
        let returns = ReturnSeries::log(prices)?;
        Self::from_returns(&prices.symbol, &returns)
    }

    /// Compute statistics of an existing return series.
    pub fn from_returns(symbol: &str, returns: &ReturnSeries) -> RiskResult<Self> {
        let values = returns.values();
        let n = values.len();
        if n < 3 {
            return Err(RiskError::InsufficientData {
                required: 3,
                available: n,
            });
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return Err(RiskError::InvalidParameter(
                "return series has zero dispersion".to_string(),
            ));
        }
        let std_dev = sample_std_dev(values).unwrap_or_default();

        let nf = n as f64;
        let m2 = central_moment(values, 2);
        let m3 = central_moment(values, 3);
        let m4 = central_moment(values, 4);

        let g1 = m3 / m2.powf(1.5);
        let skewness = g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0);
        let excess_kurtosis = m4 / (m2 * m2) - 3.0;

        let mode = kde_mode(values, std_dev, min, max, KDE_GRID_POINTS);

        debug!(symbol, observations = n, mode, "Distribution statistics computed");

        Ok(Self {
            symbol: symbol.to_string(),
            observations: n,
            mean: mean(values),
            std_dev,
            skewness,
            excess_kurtosis,
            min,
            max,
            mode,
        })
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  LOG RETURN DISTRIBUTION: {}\n", self.symbol));
        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  Observations:        {}\n", self.observations));
        s.push_str(&format!("  Mean:                {:.6}\n", self.mean));
        s.push_str(&format!("  Std Dev:             {:.6}\n", self.std_dev));
        s.push_str(&format!("  Mode (KDE):          {:.6}\n", self.mode));
        s.push_str(&format!("  Skewness:            {:.6}\n", self.skewness));
        s.push_str(&format!("  Excess Kurtosis:     {:.6}\n", self.excess_kurtosis));
        s.push_str(&format!("  Min:                 {:.6}\n", self.min));
        s.push_str(&format!("  Max:                 {:.6}\n", self.max));
        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Grid point in `[min, max]` where a Gaussian KDE peaks.
///
/// Bandwidth follows Scott's rule: `std_dev * n^(-1/5)`.
fn kde_mode(values: &[f64], std_dev: f64, min: f64, max: f64, grid_points: usize) -> f64 {
    let n = values.len() as f64;
    let h = std_dev * n.powf(-0.2);
    let norm = 1.0 / (n * h * (2.0 * PI).sqrt());
    let step = (max - min) / (grid_points - 1) as f64;

    let density = |x: f64| {
        norm * values
            .iter()
            .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
            .sum::<f64>()
    };

    let mut best_x = min;
    let mut best_density = f64::NEG_INFINITY;
    for i in 0..grid_points {
        let x = min + step * i as f64;
        let d = density(x);
        if d > best_density {
            best_density = d;
            best_x = x;
        }
    }
    best_x
}
