//! CLI command implementations.

pub mod stats;
pub mod validate;
pub mod var;

use anyhow::{Context, Result};
use riskstat_config::AppConfig;
use riskstat_core::types::Interval;
use riskstat_data::CsvPriceSource;
use std::path::PathBuf;

/// Open the CSV source from the flag, or the configured path.
fn open_source(data: Option<PathBuf>, config: &AppConfig) -> Result<CsvPriceSource> {
    let path = data.unwrap_or_else(|| config.data.path.clone());
    CsvPriceSource::new(&path).with_context(|| {
        format!(
            "Data path '{}' is not readable. Provide a CSV file or directory with --data",
            path.display()
        )
    })
}

/// Interval from the flag, or the configured one.
fn resolve_interval(flag: Option<&str>, config: &AppConfig) -> Result<Interval> {
    match flag {
        Some(s) => Ok(s.parse()?),
        None => Ok(config.data.interval),
    }
}
