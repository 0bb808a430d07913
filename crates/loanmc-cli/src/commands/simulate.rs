//! Simulate command implementation.
//!
//! Runs a Monte Carlo valuation of the configured portfolio.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use loanmc_config::LoanMcConfig;
use loanmc_math::histogram::Histogram;
use loanmc_sim::{MonteCarloEngine, ValuationReport};

use crate::cli::OutputFormat;
use crate::commands::RunArgs;
use crate::output::{
    format_money, format_percent, print_header, print_histogram, print_json_value, KeyValue,
};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Show histograms of portfolio values and discount rates
    #[arg(long)]
    pub histogram: bool,

    /// Number of histogram bins
    #[arg(long)]
    pub bins: Option<usize>,
}

/// JSON output of a run.
#[derive(Debug, Serialize)]
struct SimulationOutput {
    portfolio: String,
    total_principal: f64,
    elapsed_ms: f64,
    report: ValuationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_histogram: Option<Histogram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_rate_histogram: Option<Histogram>,
}

/// One-row CSV output of a run.
#[derive(Debug, Serialize)]
struct SimulationRow {
    portfolio: String,
    loans: u32,
    simulations: usize,
    seed: u64,
    mean: f64,
    median: f64,
    std_dev: f64,
    percentile_5: f64,
    percentile_95: f64,
    value_at_risk: f64,
    expected_shortfall: f64,
    default_rate: f64,
    prepayment_rate: f64,
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, mut settings: LoanMcConfig, format: OutputFormat) -> Result<()> {
    args.run.apply(&mut settings)?;
    if let Some(bins) = args.bins {
        settings.report.histogram_bins = bins;
    }
    let show_histograms = args.histogram || settings.report.show_histograms;
    let bins = settings.report.histogram_bins;

    let portfolio = settings.portfolio()?;
    let config = settings.simulation();
    let confidence = config.confidence_level;

    let outcome = MonteCarloEngine::new(config)?.run(&portfolio)?;
    let report =
        ValuationReport::new(&portfolio, &outcome, confidence)?.with_title(settings.report.title);

    let histograms = if show_histograms {
        Some((
            outcome.value_histogram(bins)?,
            outcome.discount_rate_histogram(bins)?,
        ))
    } else {
        None
    };

    match format {
        OutputFormat::Text => {
            print!("{}", report.render_text()?);
            if let Some((values, rates)) = &histograms {
                print_histograms(values, rates);
            }
        }
        OutputFormat::Table => {
            print_header(&report.title);
            let rows = metrics(&report, &portfolio.name, outcome.elapsed_ms);
            crate::output::print_output(&rows, format)?;
            if let Some((values, rates)) = &histograms {
                print_histograms(values, rates);
            }
        }
        OutputFormat::Json => {
            let (value_histogram, discount_rate_histogram) = match histograms {
                Some((v, r)) => (Some(v), Some(r)),
                None => (None, None),
            };
            print_json_value(&SimulationOutput {
                portfolio: portfolio.name.clone(),
                total_principal: report.total_principal,
                elapsed_ms: outcome.elapsed_ms,
                report,
                value_histogram,
                discount_rate_histogram,
            })?;
        }
        OutputFormat::Csv => {
            let row = SimulationRow {
                portfolio: portfolio.name.clone(),
                loans: report.loan_count,
                simulations: report.simulations,
                seed: report.seed,
                mean: report.summary.mean,
                median: report.summary.median,
                std_dev: report.summary.std_dev,
                percentile_5: report.summary.percentile_5,
                percentile_95: report.summary.percentile_95,
                value_at_risk: report.tail.value_at_risk,
                expected_shortfall: report.tail.expected_shortfall,
                default_rate: report.default_rate,
                prepayment_rate: report.prepayment_rate,
            };
            crate::output::print_csv(&[row])?;
        }
        OutputFormat::Minimal => {
            println!("{:.2}", report.summary.mean);
        }
    }

    Ok(())
}

fn metrics(report: &ValuationReport, portfolio: &str, elapsed_ms: f64) -> Vec<KeyValue> {
    let s = &report.summary;
    let confidence = format!("{:.0}%", report.tail.confidence * 100.0);
    vec![
        KeyValue::new("Portfolio", portfolio),
        KeyValue::new("Number of Loans", report.loan_count.to_string()),
        KeyValue::from_money("Total Principal", report.total_principal),
        KeyValue::new("Simulations", report.simulations.to_string()),
        KeyValue::new("Seed", report.seed.to_string()),
        KeyValue::new("", ""),
        KeyValue::from_money("Mean Portfolio Value", s.mean),
        KeyValue::from_money("Median Portfolio Value", s.median),
        KeyValue::from_money("Standard Deviation", s.std_dev),
        KeyValue::from_money("Standard Error of Mean", s.standard_error),
        KeyValue::from_money("5th Percentile (Downside Risk)", s.percentile_5),
        KeyValue::from_money("95th Percentile (Upside Potential)", s.percentile_95),
        KeyValue::from_money("Minimum", s.min),
        KeyValue::from_money("Maximum", s.max),
        KeyValue::new(
            format!("Value at Risk ({confidence})"),
            format_money(report.tail.value_at_risk),
        ),
        KeyValue::new(
            format!("Expected Shortfall ({confidence})"),
            format_money(report.tail.expected_shortfall),
        ),
        KeyValue::new("", ""),
        KeyValue::from_percent("Mean Discount Rate", report.discount_rates.mean),
        KeyValue::from_percent("Discount Rate Std Dev", report.discount_rates.std_dev),
        KeyValue::from_percent("Default Rate (per loan-path)", report.default_rate),
        KeyValue::from_percent("Prepayment Rate (per loan-path)", report.prepayment_rate),
        KeyValue::new("Elapsed", format!("{elapsed_ms:.1} ms")),
    ]
}

fn print_histograms(values: &Histogram, rates: &Histogram) {
    print_histogram("Portfolio Value Distribution", values, format_money);
    print_histogram("Discount Rate Distribution", rates, format_percent);
}
