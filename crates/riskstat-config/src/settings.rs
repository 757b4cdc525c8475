//! Configuration structures.

use riskstat_core::types::{ConfidenceLevel, Interval, DEFAULT_CONFIDENCE_LEVELS};
use riskstat_var::{ParametricMethod, DEFAULT_SAMPLED_DRAWS, DEFAULT_SIMULATIONS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub var: VarSettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.var.validate()
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "riskstat".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Quantile method names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParametricMode {
    #[default]
    Analytic,
    Sampled,
}

/// VaR estimation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VarSettings {
    pub confidence_levels: Vec<f64>,
    pub simulations: usize,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub parametric_method: ParametricMode,
    pub sampled_draws: usize,
}

impl VarSettings {
    /// Parametric quantile method with its draw count.
    pub fn parametric(&self) -> ParametricMethod {
        match self.parametric_method {
            ParametricMode::Analytic => ParametricMethod::Analytic,
            ParametricMode::Sampled => ParametricMethod::Sampled {
                draws: self.sampled_draws,
            },
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.confidence_levels.is_empty() {
            return Err(SettingsError::Invalid {
                key: "var.confidence_levels",
                reason: "at least one level is required".to_string(),
            });
        }
        ConfidenceLevel::parse_all(&self.confidence_levels).map_err(|e| {
            SettingsError::Invalid {
                key: "var.confidence_levels",
                reason: e.to_string(),
            }
        })?;
        if self.simulations == 0 {
            return Err(SettingsError::Invalid {
                key: "var.simulations",
                reason: "must be positive".to_string(),
            });
        }
        if self.parametric_method == ParametricMode::Sampled && self.sampled_draws == 0 {
            return Err(SettingsError::Invalid {
                key: "var.sampled_draws",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for VarSettings {
    fn default() -> Self {
        Self {
            confidence_levels: DEFAULT_CONFIDENCE_LEVELS.to_vec(),
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
            parametric_method: ParametricMode::Analytic,
            sampled_draws: DEFAULT_SAMPLED_DRAWS,
        }
    }
}

/// Price data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file, or directory of `<SYMBOL>.csv` files
    pub path: PathBuf,
    pub interval: Interval,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data"),
            interval: Interval::Daily,
        }
    }
}
