//! Stress impact calculations.
//!
//! Every scenario is simulated with the same base seed as the baseline
//! (common random numbers), so the change in value reflects the scenario
//! rather than sampling noise.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use loanmc_core::Portfolio;
use loanmc_math::statistics::{SummaryStatistics, TailMetrics};

use super::scenarios::StressScenario;
use crate::config::SimulationConfig;
use crate::engine::{MonteCarloEngine, SimulationOutcome};
use crate::error::{SimError, SimResult};

/// Result of one stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario name.
    pub scenario_name: String,

    /// Scenario description.
    pub description: Option<String>,

    /// Stressed portfolio value distribution.
    pub summary: SummaryStatistics,

    /// Stressed tail metrics.
    pub tail: TailMetrics,

    /// Change in mean value versus the baseline.
    pub mean_change: f64,

    /// Change in mean value as a percentage of the baseline mean.
    pub mean_change_pct: f64,

    /// Change in 5th-percentile value versus the baseline.
    pub p5_change: f64,

    /// Change in 5th-percentile value as a percentage of the baseline.
    pub p5_change_pct: f64,

    /// Share of loan-paths that defaulted.
    pub default_rate: f64,

    /// Share of loan-paths that prepaid.
    pub prepayment_rate: f64,
}

impl StressResult {
    /// Returns true if the scenario lowers the mean value.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.mean_change < 0.0
    }

    /// Returns true if the scenario raises the mean value.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.mean_change > 0.0
    }

    fn from_outcome(
        scenario: &StressScenario,
        outcome: &SimulationOutcome,
        baseline: &SummaryStatistics,
        confidence: f64,
    ) -> SimResult<Self> {
        let summary = outcome.summary()?;
        let mean_change = summary.mean - baseline.mean;
        let p5_change = summary.percentile_5 - baseline.percentile_5;

        Ok(Self {
            scenario_name: scenario.name.clone(),
            description: scenario.description.clone(),
            summary,
            tail: outcome.tail_metrics(confidence)?,
            mean_change,
            mean_change_pct: pct_change(mean_change, baseline.mean),
            p5_change,
            p5_change_pct: pct_change(p5_change, baseline.percentile_5),
            default_rate: outcome.default_rate(),
            prepayment_rate: outcome.prepayment_rate(),
        })
    }
}

fn pct_change(change: f64, base: f64) -> f64 {
    if base.abs() > f64::EPSILON {
        change / base * 100.0
    } else {
        0.0
    }
}

/// Runs `scenarios` against `portfolio`, each compared with an unstressed run.
///
/// When `config.seed` is `None` one seed is drawn and shared by every run.
pub fn run_stress_scenarios(
    config: &SimulationConfig,
    portfolio: &Portfolio,
    scenarios: &[StressScenario],
) -> SimResult<Vec<StressResult>> {
    if scenarios.is_empty() {
        return Err(SimError::invalid_input("no stress scenarios to run"));
    }
    for scenario in scenarios {
        scenario.validate()?;
    }

    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let base_config = config.clone().with_seed(seed);

    info!(seed, scenarios = scenarios.len(), "running stress scenarios");
    let baseline = MonteCarloEngine::new(base_config.clone())?.run(portfolio)?;
    let baseline_summary = baseline.summary()?;

    scenarios
        .iter()
        .map(|scenario| {
            debug!(scenario = %scenario.name, "running stress scenario");
            if scenario.is_baseline() {
                return StressResult::from_outcome(
                    scenario,
                    &baseline,
                    &baseline_summary,
                    config.confidence_level,
                );
            }
            let stressed_portfolio = scenario.apply(portfolio);
            let stressed_config = scenario.apply_config(&base_config);
            let outcome = MonteCarloEngine::new(stressed_config)?.run(&stressed_portfolio)?;
            StressResult::from_outcome(
                scenario,
                &outcome,
                &baseline_summary,
                config.confidence_level,
            )
        })
        .collect()
}

/// Scenario with the lowest mean change.
#[must_use]
pub fn worst_case(results: &[StressResult]) -> Option<&StressResult> {
    results
        .iter()
        .min_by(|a, b| a.mean_change.total_cmp(&b.mean_change))
}

/// Scenario with the highest mean change.
#[must_use]
pub fn best_case(results: &[StressResult]) -> Option<&StressResult> {
    results
        .iter()
        .max_by(|a, b| a.mean_change.total_cmp(&b.mean_change))
}

/// Summary of stress test results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSummary {
    /// Number of scenarios tested.
    pub scenario_count: usize,

    /// Worst-case mean change.
    pub worst_change: f64,

    /// Worst-case mean change percentage.
    pub worst_change_pct: f64,

    /// Worst-case scenario name.
    pub worst_scenario: String,

    /// Best-case mean change.
    pub best_change: f64,

    /// Best-case mean change percentage.
    pub best_change_pct: f64,

    /// Best-case scenario name.
    pub best_scenario: String,

    /// Lowest 5th-percentile value across scenarios.
    pub lowest_p5: f64,
}

/// Summarizes stress results.
#[must_use]
pub fn summarize_results(results: &[StressResult]) -> Option<StressSummary> {
    let worst = worst_case(results)?;
    let best = best_case(results)?;
    let lowest_p5 = results
        .iter()
        .map(|r| r.summary.percentile_5)
        .fold(f64::INFINITY, f64::min);

    Some(StressSummary {
        scenario_count: results.len(),
        worst_change: worst.mean_change,
        worst_change_pct: worst.mean_change_pct,
        worst_scenario: worst.scenario_name.clone(),
        best_change: best.mean_change,
        best_change_pct: best.mean_change_pct,
        best_scenario: best.scenario_name.clone(),
        lowest_p5,
    })
}
