//! Distribution statistics command implementation.

use anyhow::{Context, Result};
use chrono::{Days, Utc};
use riskstat_config::AppConfig;
use riskstat_core::types::DateRange;
use riskstat_var::DistributionStats;
use tracing::info;

use super::{open_source, resolve_interval};
use crate::cli::StatsArgs;

pub fn run(args: StatsArgs, config: &AppConfig) -> Result<()> {
    info!("Describing return distribution for {}", args.symbol);

    let end = match &args.end {
        Some(end) => end.clone(),
        None => (Utc::now().date_naive() + Days::new(1)).to_string(),
    };
    let range = DateRange::parse(&args.start, &end).context("Invalid date range")?;
    let interval = resolve_interval(args.interval.as_deref(), config)?;
    let source = open_source(args.data, config)?;

    let stats = DistributionStats::fetch(&source, &args.symbol, &range, interval)?;

    if args.json {
        println!("{}", stats.to_json()?);
    } else {
        println!("{}", stats.summary());
    }

    Ok(())
}
