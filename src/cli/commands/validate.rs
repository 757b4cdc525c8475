//! Validate configuration command.

use anyhow::Result;
use riskstat_config::load_config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Confidence levels: {:?}", config.var.confidence_levels);
            println!("Simulations: {}", config.var.simulations);
            println!("Parametric method: {:?}", config.var.parametric());
            match config.var.seed {
                Some(seed) => println!("Seed: {}", seed),
                None => println!("Seed: none (entropy)"),
            }
            println!("Data path: {}", config.data.path.display());
            println!("Interval: {}", config.data.interval);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
