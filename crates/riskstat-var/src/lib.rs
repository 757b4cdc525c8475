//! Value-at-Risk estimators and return distribution statistics.
//!
//! [`RiskEstimator`] owns one symbol's return series and offers three
//! independent VaR methods (parametric, historical, Monte Carlo) plus a
//! summary across confidence levels. [`DistributionStats`] describes the
//! shape of the log-return distribution.

mod distribution;
mod estimator;
pub mod statistics;
mod summary;

pub use distribution::{DistributionStats, KDE_GRID_POINTS};
pub use estimator::{ParametricMethod, RiskEstimator, DEFAULT_SAMPLED_DRAWS, DEFAULT_SIMULATIONS};
pub use summary::{VaRRow, VaRSummary};
