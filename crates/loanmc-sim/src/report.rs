//! Valuation report assembled from a simulation outcome.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loanmc_core::{Money, Portfolio};
use loanmc_math::statistics::{SummaryStatistics, TailMetrics};

use crate::engine::SimulationOutcome;
use crate::error::SimResult;

/// Heading printed above the plain-text report.
pub const REPORT_TITLE: &str =
    "Monte Carlo DCF Valuation for Loan Portfolio (with Interest Rate Shocks & Stress Testing)";

/// Summary of one valuation run, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// Report heading.
    pub title: String,
    /// Run that produced the figures.
    pub run_id: Uuid,
    /// Base seed of the run.
    pub seed: u64,
    /// Loans in the portfolio.
    pub loan_count: u32,
    /// Simulated paths.
    pub simulations: usize,
    /// Sum of loan principals.
    pub total_principal: f64,
    /// Portfolio value distribution.
    pub summary: SummaryStatistics,
    /// Tail metrics of the value distribution.
    pub tail: TailMetrics,
    /// Distribution of the shocked discount rate.
    pub discount_rates: SummaryStatistics,
    /// Share of loan-paths that defaulted.
    pub default_rate: f64,
    /// Share of loan-paths that prepaid.
    pub prepayment_rate: f64,
}

impl ValuationReport {
    /// Builds a report for `portfolio` from a finished run.
    pub fn new(
        portfolio: &Portfolio,
        outcome: &SimulationOutcome,
        confidence: f64,
    ) -> SimResult<Self> {
        Ok(Self {
            title: REPORT_TITLE.to_string(),
            run_id: outcome.run_id,
            seed: outcome.seed,
            loan_count: outcome.loan_count,
            simulations: outcome.simulations(),
            total_principal: portfolio.total_principal(),
            summary: outcome.summary()?,
            tail: outcome.tail_metrics(confidence)?,
            discount_rates: outcome.discount_rate_summary()?,
            default_rate: outcome.default_rate(),
            prepayment_rate: outcome.prepayment_rate(),
        })
    }

    /// Replaces the heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Renders the eight-line plain-text summary.
    pub fn render_text(&self) -> SimResult<String> {
        let s = &self.summary;
        let lines = [
            self.title.clone(),
            format!("Number of Loans: {}", self.loan_count),
            format!("Simulations: {}", self.simulations),
            format!("Mean Portfolio Value: {}", Money::from_f64(s.mean)?),
            format!("Median Portfolio Value: {}", Money::from_f64(s.median)?),
            format!("Standard Deviation: {}", Money::from_f64(s.std_dev)?),
            format!(
                "5th Percentile Portfolio Value (Downside Risk): {}",
                Money::from_f64(s.percentile_5)?
            ),
            format!(
                "95th Percentile Portfolio Value (Upside Potential): {}",
                Money::from_f64(s.percentile_95)?
            ),
        ];

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::engine::MonteCarloEngine;
    use loanmc_core::LoanTerms;

    fn report() -> ValuationReport {
        let portfolio = Portfolio::homogeneous(4, LoanTerms::standard()).unwrap();
        let outcome = MonteCarloEngine::new(
            SimulationConfig::sequential()
                .with_simulations(100)
                .with_seed(3),
        )
        .unwrap()
        .run(&portfolio)
        .unwrap();
        ValuationReport::new(&portfolio, &outcome, 0.95).unwrap()
    }

    #[test]
    fn test_render_text_layout() {
        let text = report().render_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], "Number of Loans: 4");
        assert_eq!(lines[2], "Simulations: 100");
        assert!(lines[3].starts_with("Mean Portfolio Value: $"));
        assert!(lines[4].starts_with("Median Portfolio Value: $"));
        assert!(lines[5].starts_with("Standard Deviation: $"));
        assert!(lines[6].starts_with("5th Percentile Portfolio Value (Downside Risk): $"));
        assert!(lines[7].starts_with("95th Percentile Portfolio Value (Upside Potential): $"));
    }

    #[test]
    fn test_report_fields() {
        let report = report();
        assert_eq!(report.total_principal, 40_000.0);
        assert_eq!(report.simulations, 100);
        assert_eq!(report.seed, 3);
        assert_eq!(report.tail.confidence, 0.95);
    }

    #[test]
    fn test_render_text_ends_with_single_newline() {
        let text = report().render_text().unwrap();
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_render_text_rejects_non_finite_values() {
        let mut report = report();
        report.summary.mean = f64::NAN;
        assert!(report.render_text().is_err());
    }

    #[test]
    fn test_with_title() {
        let text = report().with_title("Q3 book").render_text().unwrap();
        assert!(text.starts_with("Q3 book\n"));
    }
}
