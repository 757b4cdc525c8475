//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataSettings, LoggingConfig, ParametricMode, VarSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Load configuration from file and environment.
///
/// The file must exist. Environment variables prefixed with `RISKSTAT__`
/// override it, e.g. `RISKSTAT__VAR__SIMULATIONS=50000`.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    load(path, true)
}

/// Like [`load_config`], falling back to defaults when the file is absent.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, SettingsError> {
    load(path, false)
}

fn load(path: &Path, required: bool) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix("RISKSTAT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("var.confidence_levels")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_file_gives_defaults() {
        let config = load_config_or_default(Path::new("/nonexistent/riskstat.toml")).unwrap();
        assert_eq!(config.app.name, "riskstat");
        assert_eq!(config.var.simulations, 10_000);
    }

    #[test]
    fn test_missing_required_file_fails() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/riskstat.toml")),
            Err(SettingsError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("riskstat-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[var]
confidence_levels = [0.025, 0.05]
simulations = 20000
seed = 42
parametric_method = "sampled"

[data]
path = "prices"
interval = "1wk"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.var.confidence_levels, vec![0.025, 0.05]);
        assert_eq!(config.var.simulations, 20_000);
        assert_eq!(config.var.seed, Some(42));
        assert_eq!(config.var.parametric_method, ParametricMode::Sampled);
        assert_eq!(config.var.sampled_draws, 100_000);
        assert_eq!(config.data.interval, riskstat_core::types::Interval::Weekly);
        assert_eq!(config.logging.level, "info");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let path = std::env::temp_dir().join(format!("riskstat-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[var]\nconfidence_levels = [5.0]\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(SettingsError::Invalid { .. })
        ));

        std::fs::remove_file(&path).unwrap();
    }
}
