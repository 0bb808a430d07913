//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, ScheduleArgs, SimulateArgs, StressArgs};

/// loanmc - Monte Carlo DCF valuation for loan portfolios
#[derive(Parser)]
#[command(name = "loanmc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress status messages and lower logging to errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "LOANMC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a Monte Carlo valuation of the portfolio
    Simulate(SimulateArgs),

    /// Re-run the valuation under stress scenarios
    Stress(StressArgs),

    /// Print the amortization schedule of a single loan
    Schedule(ScheduleArgs),

    /// Inspect, create and validate configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
    /// Plain-text report
    Text,
}
