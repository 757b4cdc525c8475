//! Left-tail confidence levels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RiskError, RiskResult};

/// Levels reported when none are requested: 99%, 95% and 90% confidence.
pub const DEFAULT_CONFIDENCE_LEVELS: [f64; 3] = [0.01, 0.05, 0.10];

/// Left-tail probability in the open interval (0, 1).
///
/// `0.05` means 95% confidence: losses beyond the VaR threshold happen
/// with probability at most 5%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Validate a tail probability.
    pub fn new(level: f64) -> RiskResult<Self> {
        if level.is_finite() && level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(RiskError::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {}",
                level
            )))
        }
    }

    /// Validate a list of levels, preserving order and duplicates.
    pub fn parse_all(levels: &[f64]) -> RiskResult<Vec<Self>> {
        levels.iter().map(|&l| Self::new(l)).collect()
    }

    /// The default 1%, 5%, 10% tails.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CONFIDENCE_LEVELS.iter().map(|&l| Self(l)).collect()
    }

    /// Tail probability as a fraction.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Tail probability in percent, the rank used for percentiles.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Row label, the percentage truncated to an integer (`0.05` -> `"5%"`).
    pub fn label(&self) -> String {
        format!("{}%", self.percent().trunc() as i64)
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
