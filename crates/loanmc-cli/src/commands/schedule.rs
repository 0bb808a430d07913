//! Schedule command implementation.
//!
//! Prints the contractual amortization schedule of one loan.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use loanmc_config::LoanMcConfig;
use loanmc_sim::loan::amortization_schedule;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{format_money, print_header};

/// Arguments for the schedule command.
///
/// Unset fields come from the first configured tranche.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Principal
    #[arg(long)]
    pub principal: Option<f64>,

    /// Annual rate as a decimal (0.10 = 10%)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Rate shock added to the coupon
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub shock: f64,
}

#[derive(Debug, Serialize, Tabled)]
struct ScheduleDisplayRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Outstanding")]
    outstanding: String,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, settings: &LoanMcConfig, format: OutputFormat) -> Result<()> {
    let base = settings
        .portfolio
        .tranches
        .first()
        .ok_or_else(|| CliError::InvalidArgument("no tranche configured".to_string()))?;

    let mut terms = base.terms();
    if let Some(principal) = args.principal {
        terms.principal = principal;
    }
    if let Some(rate) = args.rate {
        terms.annual_rate = rate;
    }
    if let Some(term) = args.term {
        terms.term_years = term;
    }

    let rows = amortization_schedule(&terms, args.shock)?;

    match format {
        OutputFormat::Table | OutputFormat::Text => {
            let effective = (terms.annual_rate + args.shock).max(0.0);
            print_header(&format!(
                "Amortization: {} at {:.2}% over {} years",
                format_money(terms.principal),
                effective * 100.0,
                terms.term_years
            ));
            let display: Vec<ScheduleDisplayRow> = rows
                .iter()
                .map(|r| ScheduleDisplayRow {
                    year: r.year,
                    payment: format_money(r.payment),
                    interest: format_money(r.interest),
                    principal: format_money(r.principal),
                    outstanding: format_money(r.outstanding),
                })
                .collect();
            crate::output::print_output(&display, format)?;
        }
        OutputFormat::Json => crate::output::print_json_value(&rows)?,
        OutputFormat::Csv => crate::output::print_csv(&rows)?,
        OutputFormat::Minimal => {
            if let Some(first) = rows.first() {
                println!("{:.2}", first.payment);
            }
        }
    }

    Ok(())
}
