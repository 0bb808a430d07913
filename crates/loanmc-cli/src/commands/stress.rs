//! Stress command implementation.
//!
//! Re-values the portfolio under each stress scenario with the baseline's
//! seed and reports the change against the unstressed run.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use loanmc_config::LoanMcConfig;
use loanmc_sim::stress::{run_stress_scenarios, summarize_results, StressResult, StressScenario};

use crate::cli::OutputFormat;
use crate::commands::RunArgs;
use crate::error::CliError;
use crate::output::{
    format_money, format_money_change, format_pct_change, format_percent, print_header,
    print_json_value, print_warning,
};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Only run the named scenario (repeatable, case-insensitive)
    #[arg(long = "scenario")]
    pub scenarios: Vec<String>,
}

/// One table row per scenario.
#[derive(Debug, Serialize, Tabled)]
struct StressRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Mean Value")]
    mean: String,
    #[tabled(rename = "Δ Mean")]
    mean_change: String,
    #[tabled(rename = "Δ Mean %")]
    mean_change_pct: String,
    #[tabled(rename = "5th Pct")]
    p5: String,
    #[tabled(rename = "Δ 5th Pct")]
    p5_change: String,
    #[tabled(rename = "Defaults")]
    default_rate: String,
    #[tabled(rename = "Prepays")]
    prepayment_rate: String,
}

impl From<&StressResult> for StressRow {
    fn from(r: &StressResult) -> Self {
        Self {
            scenario: r.scenario_name.clone(),
            mean: format_money(r.summary.mean),
            mean_change: format_money_change(r.mean_change),
            mean_change_pct: format_pct_change(r.mean_change_pct),
            p5: format_money(r.summary.percentile_5),
            p5_change: format_money_change(r.p5_change),
            default_rate: format_percent(r.default_rate),
            prepayment_rate: format_percent(r.prepayment_rate),
        }
    }
}

/// Flat CSV record per scenario.
#[derive(Debug, Serialize)]
struct StressCsvRow<'a> {
    scenario: &'a str,
    mean: f64,
    median: f64,
    std_dev: f64,
    percentile_5: f64,
    percentile_95: f64,
    mean_change: f64,
    mean_change_pct: f64,
    p5_change: f64,
    p5_change_pct: f64,
    default_rate: f64,
    prepayment_rate: f64,
}

/// Selects scenarios by name; an empty filter keeps all of them.
fn select_scenarios(
    available: Vec<StressScenario>,
    names: &[String],
) -> Result<Vec<StressScenario>, CliError> {
    if names.is_empty() {
        return Ok(available);
    }
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(name))
                .cloned()
                .ok_or_else(|| CliError::UnknownScenario(name.clone()))
        })
        .collect()
}

/// Execute the stress command.
pub fn execute(args: StressArgs, mut settings: LoanMcConfig, format: OutputFormat) -> Result<()> {
    args.run.apply(&mut settings)?;

    let scenarios = select_scenarios(settings.scenarios(), &args.scenarios)?;
    let portfolio = settings.portfolio()?;
    let config = settings.simulation();

    let results = run_stress_scenarios(&config, &portfolio, &scenarios)?;
    let summary = summarize_results(&results);

    match format {
        OutputFormat::Table | OutputFormat::Text => {
            print_header(&format!(
                "Stress Testing: {} ({} loans, {} paths)",
                portfolio.name,
                portfolio.loan_count(),
                config.simulations
            ));
            let rows: Vec<StressRow> = results.iter().map(StressRow::from).collect();
            crate::output::print_output(&rows, format)?;

            if let Some(summary) = &summary {
                println!(
                    "\nWorst case: {} ({}, {})",
                    summary.worst_scenario,
                    format_money_change(summary.worst_change),
                    format_pct_change(summary.worst_change_pct)
                );
                println!(
                    "Best case:  {} ({}, {})",
                    summary.best_scenario,
                    format_money_change(summary.best_change),
                    format_pct_change(summary.best_change_pct)
                );
                println!("Lowest 5th percentile: {}", format_money(summary.lowest_p5));
            }
            if results.iter().all(|r| !r.is_loss()) && results.len() > 1 {
                print_warning("No scenario lowered the mean portfolio value");
            }
        }
        OutputFormat::Json => {
            print_json_value(&serde_json::json!({
                "portfolio": portfolio.name,
                "simulations": config.simulations,
                "results": results,
                "summary": summary,
            }))?;
        }
        OutputFormat::Csv => {
            let rows: Vec<StressCsvRow<'_>> = results
                .iter()
                .map(|r| StressCsvRow {
                    scenario: &r.scenario_name,
                    mean: r.summary.mean,
                    median: r.summary.median,
                    std_dev: r.summary.std_dev,
                    percentile_5: r.summary.percentile_5,
                    percentile_95: r.summary.percentile_95,
                    mean_change: r.mean_change,
                    mean_change_pct: r.mean_change_pct,
                    p5_change: r.p5_change,
                    p5_change_pct: r.p5_change_pct,
                    default_rate: r.default_rate,
                    prepayment_rate: r.prepayment_rate,
                })
                .collect();
            crate::output::print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            if let Some(summary) = summary {
                println!("{}: {:.2}", summary.worst_scenario, summary.worst_change);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanmc_sim::stress::standard;

    #[test]
    fn test_select_scenarios_by_name() {
        let picked = select_scenarios(
            standard::all(),
            &["rates +200BP".to_string(), "Baseline".to_string()],
        )
        .unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].name, "Rates +200bp");
        assert_eq!(picked[1].name, "Baseline");
    }

    #[test]
    fn test_select_scenarios_unknown() {
        let err = select_scenarios(standard::all(), &["Meteor".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Meteor"));
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        assert_eq!(select_scenarios(standard::all(), &[]).unwrap().len(), 8);
    }
}
