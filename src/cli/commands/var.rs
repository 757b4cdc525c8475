//! VaR command implementation.

use anyhow::{Context, Result};
use riskstat_config::AppConfig;
use riskstat_core::types::DateRange;
use riskstat_var::{ParametricMethod, RiskEstimator};
use tracing::info;

use super::{open_source, resolve_interval};
use crate::cli::{OutputFormat, ParametricArg, VarArgs};

pub fn run(args: VarArgs, config: &AppConfig) -> Result<()> {
    info!("Estimating VaR for {}", args.symbol);

    let range = DateRange::parse(&args.start, &args.end).context("Invalid date range")?;
    let interval = resolve_interval(args.interval.as_deref(), config)?;
    let source = open_source(args.data, config)?;

    let levels = if args.levels.is_empty() {
        config.var.confidence_levels.clone()
    } else {
        args.levels
    };
    let simulations = args.simulations.unwrap_or(config.var.simulations);
    let parametric = match args.parametric {
        Some(ParametricArg::Analytic) => ParametricMethod::Analytic,
        Some(ParametricArg::Sampled) => ParametricMethod::Sampled {
            draws: config.var.sampled_draws,
        },
        None => config.var.parametric(),
    };

    let estimator = RiskEstimator::fetch(&source, &args.symbol, &range, interval)?
        .with_parametric_method(parametric);
    let mut estimator = match args.seed.or(config.var.seed) {
        Some(seed) => estimator.seeded(seed),
        None => estimator,
    };

    let summary = estimator.summary_with(&levels, simulations)?;

    // Output results
    let rendered = match args.output {
        OutputFormat::Text => summary.to_table(),
        OutputFormat::Json => summary.to_json()?,
        OutputFormat::Csv => summary.to_csv()?,
    };
    println!("{}", rendered);

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, &rendered)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
