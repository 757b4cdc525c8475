//! Risk statistics CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, LogLevel};
use logging::setup_logging;
use riskstat_config::{load_config_or_default, AppConfig};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Var(args) => {
            let config = init(&cli.config, cli.log_level, cli.json_logs)?;
            cli::commands::var::run(args, &config)
        }
        Commands::Stats(args) => {
            let config = init(&cli.config, cli.log_level, cli.json_logs)?;
            cli::commands::stats::run(args, &config)
        }
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}

/// Load configuration, then setup logging from flags or config.
fn init(config_path: &Path, log_level: Option<LogLevel>, json_logs: bool) -> Result<AppConfig> {
    let config = load_config_or_default(config_path).with_context(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;

    let level = match log_level {
        Some(level) => level.as_str(),
        None => config.logging.level.as_str(),
    };
    setup_logging(level, json_logs || config.logging.format == "json");

    Ok(config)
}
