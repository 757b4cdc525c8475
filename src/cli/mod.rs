//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskstat")]
#[command(author, version, about = "Value-at-Risk and return distribution statistics")]
pub struct Cli {
    /// Configuration file path (optional, defaults apply when missing)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ParametricArg {
    /// Closed-form inverse normal CDF
    Analytic,
    /// Percentile of simulated standard-normal draws
    Sampled,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate Value-at-Risk with parametric, historical and Monte Carlo methods
    Var(VarArgs),
    /// Describe the log-return distribution
    Stats(StatsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct VarArgs {
    /// Symbol to analyse
    #[arg(short, long)]
    pub symbol: String,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub end: String,

    /// Price data: CSV file or directory of <SYMBOL>.csv files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Tail probabilities (comma-separated), e.g. 0.01,0.05,0.1
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<f64>,

    /// Monte Carlo simulations per level
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Parametric quantile method
    #[arg(long)]
    pub parametric: Option<ParametricArg>,

    /// Sampling interval (1d, 1wk, 1mo)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Save the rendered output to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct StatsArgs {
    /// Symbol to analyse
    #[arg(short, long)]
    pub symbol: String,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD, exclusive); defaults to tomorrow
    #[arg(long)]
    pub end: Option<String>,

    /// Price data: CSV file or directory of <SYMBOL>.csv files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Sampling interval (1d, 1wk, 1mo)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
