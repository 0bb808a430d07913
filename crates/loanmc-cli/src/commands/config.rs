//! Config command implementation.
//!
//! Shows the effective settings, writes starter files and validates them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use loanmc_config::LoanMcConfig;

use crate::cli::OutputFormat;
use crate::commands::{default_config_path, load_settings};
use crate::error::CliError;
use crate::output::{
    format_money, format_percent, print_header, print_info, print_json_value, print_success,
    KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a starter configuration file
    Init(InitArgs),

    /// Check a configuration file
    Validate(ValidateArgs),

    /// List the stress scenarios that `stress` would run
    Scenarios,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (defaults to the user config directory)
    pub path: Option<PathBuf>,

    /// Write the 500-path preset instead of the reference run
    #[arg(long)]
    pub quick: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    name: String,
    #[tabled(rename = "Rate Shift (bp)")]
    rate_shift_bps: f64,
    #[tabled(rename = "Vol ×")]
    volatility_multiplier: f64,
    #[tabled(rename = "Default ×")]
    default_multiplier: f64,
    #[tabled(rename = "Prepay ×")]
    prepay_multiplier: f64,
    #[tabled(rename = "Description")]
    description: String,
}

/// Execute the config command.
///
/// Only `show` and `scenarios` load the effective settings.
pub fn execute(args: ConfigArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(&load_settings(config_path)?, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
        ConfigCommand::Validate(validate_args) => execute_validate(validate_args, format),
        ConfigCommand::Scenarios => execute_scenarios(&load_settings(config_path)?, format),
    }
}

/// Show the effective configuration.
fn execute_show(settings: &LoanMcConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let sim = &settings.simulation;
            let mut results = vec![
                KeyValue::new("simulation.simulations", sim.simulations.to_string()),
                KeyValue::from_percent("simulation.base_discount_rate", sim.base_discount_rate),
                KeyValue::from_percent("simulation.rate_shock_std", sim.rate_shock_std),
                KeyValue::new(
                    "simulation.seed",
                    sim.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
                ),
                KeyValue::new("simulation.confidence_level", sim.confidence_level.to_string()),
                KeyValue::new("simulation.parallel", sim.parallel.to_string()),
                KeyValue::new("sensitivity.default_beta", settings.sensitivity.default_beta.to_string()),
                KeyValue::new("sensitivity.prepay_beta", settings.sensitivity.prepay_beta.to_string()),
                KeyValue::new("portfolio.name", settings.portfolio.name.clone()),
            ];
            for (i, t) in settings.portfolio.tranches.iter().enumerate() {
                results.push(KeyValue::new(
                    format!("portfolio.tranches[{i}]"),
                    format!(
                        "{} × {} {} at {} over {}y, PD {}, PP {}, recovery {}",
                        t.count,
                        t.name,
                        format_money(t.principal),
                        format_percent(t.annual_rate),
                        t.term_years,
                        format_percent(t.default_probability),
                        format_percent(t.prepay_probability),
                        format_percent(t.recovery_rate),
                    ),
                ));
            }
            results.push(KeyValue::new(
                "stress.scenarios",
                settings.scenarios().len().to_string(),
            ));
            results.push(KeyValue::new(
                "report.histogram_bins",
                settings.report.histogram_bins.to_string(),
            ));

            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => print_json_value(settings)?,
        OutputFormat::Minimal | OutputFormat::Text => {
            print!("{}", settings.to_toml_string()?);
        }
    }
    Ok(())
}

/// Write a starter configuration file.
fn execute_init(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => default_config_path()?,
    };
    if path.exists() && !args.force {
        return Err(CliError::FileExists(path).into());
    }

    let config = if args.quick {
        LoanMcConfig::quick()
    } else {
        LoanMcConfig::standard()
    };
    let content = format!(
        "# loanmc configuration\n# Generated {}\n\n{}",
        chrono::Local::now().format("%Y-%m-%d %H:%M"),
        config.to_toml_string()?
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    print_success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Check a configuration file.
fn execute_validate(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let config = LoanMcConfig::from_file(&args.path)
        .with_context(|| format!("{} is not a valid configuration", args.path.display()))?;
    let portfolio = config.portfolio()?;

    match format {
        OutputFormat::Json => print_json_value(&serde_json::json!({
            "path": args.path,
            "valid": true,
            "loans": portfolio.loan_count(),
            "simulations": config.simulation.simulations,
        }))?,
        OutputFormat::Minimal => println!("valid"),
        _ => {
            print_success(&format!("{} is valid", args.path.display()));
            print_info(&format!(
                "{} loans in {} tranche(s), {} simulations, {} stress scenario(s)",
                portfolio.loan_count(),
                portfolio.tranches().len(),
                config.simulation.simulations,
                config.scenarios().len()
            ));
        }
    }
    Ok(())
}

/// List stress scenarios.
fn execute_scenarios(settings: &LoanMcConfig, format: OutputFormat) -> Result<()> {
    let scenarios = settings.scenarios();
    match format {
        OutputFormat::Json => print_json_value(&scenarios)?,
        OutputFormat::Minimal => {
            for s in &scenarios {
                println!("{}", s.name);
            }
        }
        _ => {
            let rows: Vec<ScenarioRow> = scenarios
                .into_iter()
                .map(|s| ScenarioRow {
                    name: s.name,
                    rate_shift_bps: s.rate_shift_bps,
                    volatility_multiplier: s.volatility_multiplier,
                    default_multiplier: s.default_multiplier,
                    prepay_multiplier: s.prepay_multiplier,
                    description: s.description.unwrap_or_default(),
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Stress Scenarios");
            }
            crate::output::print_output(&rows, format)?;
        }
    }
    Ok(())
}
