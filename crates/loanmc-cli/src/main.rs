//! loanmc CLI - Monte Carlo DCF valuation of loan portfolios.
//!
//! # Usage
//!
//! ```bash
//! # Value the reference book (50 loans, 5,000 paths)
//! loanmc simulate --format text
//!
//! # Reproducible run with a histogram
//! loanmc simulate --seed 42 --histogram
//!
//! # Value a loan tape under the standard stress scenarios
//! loanmc stress --tape book.csv
//!
//! # Amortization schedule of one loan
//! loanmc schedule --principal 25000 --rate 0.07 --term 5
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    output::set_quiet(cli.quiet);

    let format = cli.format;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Simulate(args) => {
            commands::simulate::execute(args, commands::load_settings(config_path)?, format)?;
        }
        Commands::Stress(args) => {
            commands::stress::execute(args, commands::load_settings(config_path)?, format)?;
        }
        Commands::Schedule(args) => {
            commands::schedule::execute(args, &commands::load_settings(config_path)?, format)?;
        }
        // init and validate must work while the default file is broken
        Commands::Config(args) => commands::config::execute(args, config_path, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
