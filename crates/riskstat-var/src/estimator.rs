//! Value-at-Risk estimation over a single return series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};
use riskstat_core::error::{RiskError, RiskResult};
use riskstat_core::traits::PriceSource;
use riskstat_core::types::{ConfidenceLevel, DateRange, Interval, PriceSeries, ReturnSeries};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal as StatrsNormal};
use tracing::{debug, info};

use crate::statistics::{mean, percentile, sample_std_dev};
use crate::summary::{VaRRow, VaRSummary};

/// Simulated draws per Monte Carlo estimate.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Standard-normal draws used by [`ParametricMethod::Sampled`].
pub const DEFAULT_SAMPLED_DRAWS: usize = 100_000;

/// How the parametric estimator obtains the standard-normal quantile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ParametricMethod {
    /// Closed-form inverse normal CDF. Deterministic.
    #[default]
    Analytic,
    /// Empirical percentile of `draws` standard-normal samples.
    Sampled { draws: usize },
}

/// Estimates Value-at-Risk for one symbol's returns.
///
/// Prices and returns are fixed at construction. The three estimators are
/// independent; the parametric (when sampled) and Monte Carlo ones draw
/// from the estimator's own random generator, so a seeded estimator
/// reproduces its results exactly.
pub struct RiskEstimator<R = StdRng> {
    symbol: String,
    prices: Option<PriceSeries>,
    returns: ReturnSeries,
    parametric: ParametricMethod,
    rng: R,
}

impl RiskEstimator<StdRng> {
    /// Fetch daily prices for `symbol` over `range` and derive returns.
    pub fn new<S: PriceSource>(source: &S, symbol: &str, range: &DateRange) -> RiskResult<Self> {
        Self::fetch(source, symbol, range, Interval::Daily)
    }

    /// Fetch prices at the given interval and derive returns.
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
        info!(
            symbol,
            source = source.name(),
            %range,
            prices = prices.len(),
            "Fetched price series"
        );
        Self::from_prices(prices)
    }

    /// Build from a price series already in hand.
    pub fn from_prices(prices: PriceSeries) -> RiskResult<Self> {
        let returns = ReturnSeries::simple(&prices)?;
        Ok(Self {
            symbol: prices.symbol.clone(),
            prices: Some(prices),
            returns,
            parametric: ParametricMethod::default(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Build from precomputed simple returns.
    pub fn from_returns(symbol: impl Into<String>, returns: Vec<f64>) -> RiskResult<Self> {
        Ok(Self {
            symbol: symbol.into(),
            prices: None,
            returns: ReturnSeries::from_values(returns)?,
            parametric: ParametricMethod::default(),
            rng: StdRng::from_entropy(),
        })
    }
}

impl<R: Rng> RiskEstimator<R> {
    /// Replace the random generator.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> RiskEstimator<R2> {
        RiskEstimator {
            symbol: self.symbol,
            prices: self.prices,
            returns: self.returns,
            parametric: self.parametric,
            rng,
        }
    }

    /// Use a `StdRng` seeded with `seed`.
    pub fn seeded(self, seed: u64) -> RiskEstimator<StdRng> {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Choose how the parametric quantile is computed.
    pub fn with_parametric_method(mut self, method: ParametricMethod) -> Self {
        self.parametric = method;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Source prices, absent when built from returns.
    pub fn prices(&self) -> Option<&PriceSeries> {
        self.prices.as_ref()
    }

    pub fn returns(&self) -> &ReturnSeries {
        &self.returns
    }

    pub fn parametric_method(&self) -> ParametricMethod {
        self.parametric
    }

    /// Sample mean of the returns.
    pub fn mean(&self) -> f64 {
        mean(self.returns.values())
    }

    /// Unbiased sample standard deviation of the returns.
    pub fn std_dev(&self) -> RiskResult<f64> {
        sample_std_dev(self.returns.values()).ok_or(RiskError::InsufficientData {
            required: 2,
            available: self.returns.len(),
        })
    }

    /// Normal-distribution VaR: `|mu + sigma * z_p|`.
    pub fn parametric_var(&mut self, confidence_level: f64) -> RiskResult<f64> {
        let level = ConfidenceLevel::new(confidence_level)?;
        let mu = self.mean();
        let sigma = self.std_dev()?;

        let z = match self.parametric {
            ParametricMethod::Analytic => standard_normal_quantile(level)?,
            ParametricMethod::Sampled { draws } => {
                if draws == 0 {
                    return Err(RiskError::InvalidParameter(
                        "sampled draws must be positive".to_string(),
                    ));
                }
                let sample: Vec<f64> = Distribution::<f64>::sample_iter(StandardNormal, &mut self.rng)
                    .take(draws)
                    .collect();
                empirical_quantile(&sample, level)?
            }
        };

        let var = (mu + sigma * z).abs();
        debug!(symbol = %self.symbol, %level, z, var, "Parametric VaR");
        Ok(var)
    }

    /// Empirical-percentile VaR of the observed returns.
    pub fn historical_var(&self, confidence_level: f64) -> RiskResult<f64> {
        let level = ConfidenceLevel::new(confidence_level)?;
        let var = empirical_quantile(self.returns.values(), level)?.abs();
        debug!(symbol = %self.symbol, %level, var, "Historical VaR");
        Ok(var)
    }

    /// Monte Carlo VaR with [`DEFAULT_SIMULATIONS`] draws.
    pub fn monte_carlo_var(&mut self, confidence_level: f64) -> RiskResult<f64> {
        self.monte_carlo_var_with(confidence_level, DEFAULT_SIMULATIONS)
    }

    /// Monte Carlo VaR: percentile of `simulations` draws from the fitted normal.
    pub fn monte_carlo_var_with(
        &mut self,
        confidence_level: f64,
        simulations: usize,
    ) -> RiskResult<f64> {
        let level = ConfidenceLevel::new(confidence_level)?;
        if simulations == 0 {
            return Err(RiskError::InvalidParameter(
                "simulations must be positive".to_string(),
            ));
        }

        let normal = Normal::new(self.mean(), self.std_dev()?)
            .map_err(|e| RiskError::InvalidParameter(e.to_string()))?;
        let simulated: Vec<f64> = normal.sample_iter(&mut self.rng).take(simulations).collect();

        let var = empirical_quantile(&simulated, level)?.abs();
        debug!(symbol = %self.symbol, %level, simulations, var, "Monte Carlo VaR");
        Ok(var)
    }

    /// All three estimates at each of `confidence_levels`, in input order.
    pub fn summary(&mut self, confidence_levels: &[f64]) -> RiskResult<VaRSummary> {
        self.summary_with(confidence_levels, DEFAULT_SIMULATIONS)
    }

    /// Summary at the 1%, 5% and 10% tails.
    pub fn default_summary(&mut self) -> RiskResult<VaRSummary> {
        let levels: Vec<f64> = ConfidenceLevel::defaults()
            .into_iter()
            .map(f64::from)
            .collect();
        self.summary(&levels)
    }

    /// Summary with an explicit Monte Carlo simulation count.
    pub fn summary_with(
        &mut self,
        confidence_levels: &[f64],
        simulations: usize,
    ) -> RiskResult<VaRSummary> {
        let mut rows = Vec::with_capacity(confidence_levels.len());

        for &cl in confidence_levels {
            let level = ConfidenceLevel::new(cl)?;
            rows.push(VaRRow {
                confidence_level: level.label(),
                parametric: self.parametric_var(cl)?,
                historical: self.historical_var(cl)?,
                monte_carlo: self.monte_carlo_var_with(cl, simulations)?,
            });
        }

        info!(symbol = %self.symbol, rows = rows.len(), "VaR summary computed");
        Ok(VaRSummary::new(self.symbol.clone(), rows))
    }
}

/// Inverse standard-normal CDF at the tail probability.
fn standard_normal_quantile(level: ConfidenceLevel) -> RiskResult<f64> {
    let normal =
        StatrsNormal::new(0.0, 1.0).map_err(|e| RiskError::InvalidParameter(e.to_string()))?;
    Ok(normal.inverse_cdf(level.value()))
}

fn empirical_quantile(values: &[f64], level: ConfidenceLevel) -> RiskResult<f64> {
    percentile(values, level.percent()).ok_or(RiskError::InsufficientData {
        required: 1,
        available: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskstat_core::error::DataError;
    use riskstat_core::types::PricePoint;
    use riskstat_data::InMemoryPriceSource;

    const EXAMPLE: [f64; 10] = [
        0.01, -0.02, 0.015, -0.005, 0.02, -0.01, 0.005, -0.03, 0.012, -0.008,
    ];

    fn example() -> RiskEstimator {
        RiskEstimator::from_returns("TEST", EXAMPLE.to_vec())
            .unwrap()
            .seeded(42)
    }

    fn normal_returns(n: usize, seed: u64) -> Vec<f64> {
        let normal = Normal::new(0.0, 0.01).unwrap();
        normal
            .sample_iter(StdRng::seed_from_u64(seed))
            .take(n)
            .collect()
    }

    fn daily_points(prices: &[f64]) -> Vec<PricePoint> {
        // 2024-01-01T00:00:00Z
        let start = 1_704_067_200_000i64;
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(start + i as i64 * 86_400_000, p))
            .collect()
    }

    fn range() -> DateRange {
        DateRange::parse("2024-01-01", "2025-01-01").unwrap()
    }

    #[test]
    fn test_historical_var_matches_interpolated_percentile() {
        let estimator = example();
        // Sorted: -0.03, -0.02, ...; rank 0.9 -> -0.03 + 0.9 * 0.01
        let var = estimator.historical_var(0.1).unwrap();
        assert!((var - 0.021).abs() < 1e-12);
    }

    #[test]
    fn test_historical_var_is_deterministic() {
        let estimator = example();
        let first = estimator.historical_var(0.05).unwrap();
        let second = estimator.historical_var(0.05).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_methods_non_negative() {
        let mut estimator = example();
        for cl in [0.01, 0.05, 0.1, 0.5, 0.9, 0.99] {
            assert!(estimator.parametric_var(cl).unwrap() >= 0.0);
            assert!(estimator.historical_var(cl).unwrap() >= 0.0);
            assert!(estimator.monte_carlo_var(cl).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_parametric_var_analytic() {
        let mut estimator = example();
        let mu = mean(&EXAMPLE);
        let sigma = sample_std_dev(&EXAMPLE).unwrap();
        // z at 5% is -1.6448536...
        let expected = (mu + sigma * -1.6448536269514729).abs();

        let var = estimator.parametric_var(0.05).unwrap();
        assert!((var - expected).abs() < 1e-9);
        assert_eq!(var, estimator.parametric_var(0.05).unwrap());
    }

    #[test]
    fn test_parametric_var_sampled_close_to_analytic() {
        let mut analytic = example();
        let mut sampled = example().with_parametric_method(ParametricMethod::Sampled {
            draws: DEFAULT_SAMPLED_DRAWS,
        });

        let a = analytic.parametric_var(0.05).unwrap();
        let s = sampled.parametric_var(0.05).unwrap();
        assert!((a - s).abs() / a < 0.05, "analytic {} vs sampled {}", a, s);
    }

    #[test]
    fn test_sampled_rejects_zero_draws() {
        let mut estimator =
            example().with_parametric_method(ParametricMethod::Sampled { draws: 0 });
        assert!(matches!(
            estimator.parametric_var(0.05),
            Err(RiskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_monte_carlo_close_to_parametric() {
        let mut estimator = example();
        let parametric = estimator.parametric_var(0.05).unwrap();
        let mc = estimator.monte_carlo_var_with(0.05, 200_000).unwrap();
        assert!((parametric - mc).abs() < 0.002, "{} vs {}", parametric, mc);
    }

    #[test]
    fn test_seeded_monte_carlo_is_reproducible() {
        let mut a = example().seeded(7);
        let mut b = example().seeded(7);
        assert_eq!(
            a.monte_carlo_var(0.05).unwrap(),
            b.monte_carlo_var(0.05).unwrap()
        );
    }

    #[test]
    fn test_monte_carlo_draws_fresh_samples() {
        let mut estimator = example();
        let first = estimator.monte_carlo_var(0.05).unwrap();
        let second = estimator.monte_carlo_var(0.05).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut estimator = example();
        for cl in [0.0, 1.0, -0.1, 1.2, f64::NAN] {
            assert!(matches!(
                estimator.parametric_var(cl),
                Err(RiskError::InvalidParameter(_))
            ));
            assert!(matches!(
                estimator.historical_var(cl),
                Err(RiskError::InvalidParameter(_))
            ));
            assert!(matches!(
                estimator.monte_carlo_var(cl),
                Err(RiskError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            estimator.monte_carlo_var_with(0.05, 0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            estimator.summary(&[0.05, 1.5]),
            Err(RiskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_historical_var_monotonic_in_tail() {
        let estimator = RiskEstimator::from_returns("N", normal_returns(5_000, 1)).unwrap();
        let v1 = estimator.historical_var(0.01).unwrap();
        let v5 = estimator.historical_var(0.05).unwrap();
        let v10 = estimator.historical_var(0.10).unwrap();
        assert!(v1 >= v5 && v5 >= v10, "{} {} {}", v1, v5, v10);
    }

    #[test]
    fn test_summary_preserves_order_and_duplicates() {
        let mut estimator = example();
        let summary = estimator.summary(&[0.1, 0.01, 0.1]).unwrap();

        let labels: Vec<&str> = summary
            .rows()
            .iter()
            .map(|r| r.confidence_level.as_str())
            .collect();
        assert_eq!(labels, vec!["10%", "1%", "10%"]);
        assert_eq!(summary.symbol(), "TEST");
    }

    #[test]
    fn test_default_summary() {
        let mut estimator = example();
        let summary = estimator.default_summary().unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.rows()[0].confidence_level, "1%");
        assert_eq!(summary.rows()[2].confidence_level, "10%");

        let historical = estimator.historical_var(0.05).unwrap();
        assert_eq!(summary.rows()[1].historical, historical);
    }

    #[test]
    fn test_summary_deterministic_columns_repeat() {
        let mut estimator = example();
        let first = estimator.default_summary().unwrap();
        let second = estimator.default_summary().unwrap();
        for (a, b) in first.rows().iter().zip(second.rows()) {
            assert_eq!(a.historical, b.historical);
            assert_eq!(a.parametric, b.parametric);
        }
    }

    #[test]
    fn test_single_return_needs_two_for_spread() {
        let mut estimator = RiskEstimator::from_returns("ONE", vec![-0.01]).unwrap();
        assert!((estimator.historical_var(0.05).unwrap() - 0.01).abs() < 1e-12);
        assert!(matches!(
            estimator.parametric_var(0.05),
            Err(RiskError::InsufficientData { required: 2, available: 1 })
        ));
        assert!(matches!(
            estimator.monte_carlo_var(0.05),
            Err(RiskError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_from_returns_rejects_empty() {
        assert!(matches!(
            RiskEstimator::from_returns("EMPTY", vec![]),
            Err(RiskError::EmptyReturns { .. })
        ));
    }

    #[test]
    fn test_new_fetches_from_source() {
        let source = InMemoryPriceSource::new()
            .with_points("SPY", daily_points(&[100.0, 101.0, 99.0, 102.0]))
            .unwrap();

        let estimator = RiskEstimator::new(&source, "SPY", &range()).unwrap();
        assert_eq!(estimator.symbol(), "SPY");
        assert_eq!(estimator.returns().len(), 3);
        assert_eq!(estimator.prices().map(|p| p.len()), Some(4));
        assert!((estimator.returns().values()[0] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_new_empty_source_is_data_unavailable() {
        let source = InMemoryPriceSource::new()
            .with_points("SPY", daily_points(&[100.0, 101.0]))
            .unwrap();
        let later = DateRange::parse("2030-01-01", "2031-01-01").unwrap();

        assert!(matches!(
            RiskEstimator::new(&source, "SPY", &later),
            Err(RiskError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_new_single_price_is_empty_returns() {
        let source = InMemoryPriceSource::new()
            .with_points("SPY", daily_points(&[100.0]))
            .unwrap();

        assert!(matches!(
            RiskEstimator::new(&source, "SPY", &range()),
            Err(RiskError::EmptyReturns { prices: 1 })
        ));
    }

    #[test]
    fn test_source_errors_pass_through() {
        let source = InMemoryPriceSource::new();
        assert!(matches!(
            RiskEstimator::new(&source, "SPY", &range()),
            Err(RiskError::Data(DataError::SymbolNotFound(_)))
        ));
    }
}
