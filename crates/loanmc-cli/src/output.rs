//! Output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use loanmc_core::Money;
use loanmc_math::histogram::Histogram;

use crate::cli::OutputFormat;

const HISTOGRAM_WIDTH: usize = 40;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences success and info messages for the rest of the process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data, false),
        OutputFormat::Text => print_table(data, true),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table; `plain` drops the borders.
fn print_table<T: Tabled>(data: &[T], plain: bool) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let mut table = Table::new(data);
    if plain {
        table.with(Style::blank());
    } else {
        table.with(Style::rounded());
    }
    table.with(Modify::new(Columns::first()).with(Alignment::left()));

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Prints any value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Formats a dollar amount with thousands separators.
pub fn format_money(value: f64) -> String {
    Money::from_f64(value).map_or_else(|_| format!("{value:.2}"), |m| m.to_string())
}

/// Formats a signed dollar change.
pub fn format_money_change(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_money(value))
    } else {
        format_money(value)
    }
}

/// Formats a decimal as a percentage string.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Formats a signed percentage that is already scaled by 100.
pub fn format_pct_change(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as dollars.
    pub fn from_money(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_money(value))
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_percent(value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a horizontal bar chart of a histogram.
pub fn print_histogram(title: &str, histogram: &Histogram, label: impl Fn(f64) -> String) {
    print_header(title);

    let max = histogram.max_count().max(1);
    let labels: Vec<String> = histogram.bins().iter().map(|b| label(b.midpoint())).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    for (bin, label) in histogram.bins().iter().zip(&labels) {
        let bar_len = (bin.count * HISTOGRAM_WIDTH).div_ceil(max);
        println!(
            "{label:>label_width$} │ {} {}",
            "█".repeat(bar_len).cyan(),
            bin.count
        );
    }
}
