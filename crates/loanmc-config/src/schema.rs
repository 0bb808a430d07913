//! TOML configuration schema.
//!
//! ```toml
//! [simulation]
//! simulations = 5000
//! base_discount_rate = 0.08
//! rate_shock_std = 0.02
//! seed = 42
//!
//! [sensitivity]
//! default_beta = 0.5
//! prepay_beta = 0.3
//!
//! [portfolio]
//! name = "Consumer book"
//!
//! [[portfolio.tranches]]
//! name = "prime"
//! count = 50
//! principal = 10000.0
//! annual_rate = 0.10
//! term_years = 10
//! default_probability = 0.02
//! prepay_probability = 0.05
//!
//! [[stress.scenarios]]
//! name = "Rates +300bp"
//! rate_shift_bps = 300.0
//!
//! [report]
//! histogram_bins = 50
//! ```
//!
//! Every section and field is optional; omitted values take the defaults of
//! the reference run (50 loans of $10,000 at 10% over 10 years, 5,000 paths).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use loanmc_core::{LoanTerms, LoanTranche, Portfolio, RateSensitivity};
use loanmc_sim::report::REPORT_TITLE;
use loanmc_sim::stress::{standard, StressScenario};
use loanmc_sim::SimulationConfig;

use crate::error::{ConfigResult, Validate, ValidationError};

/// Complete loanmc configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanMcConfig {
    /// Monte Carlo run settings.
    pub simulation: SimulationSection,

    /// Borrower response to rate shocks.
    pub sensitivity: RateSensitivity,

    /// Loans to value.
    pub portfolio: PortfolioSection,

    /// Stress scenarios.
    pub stress: StressSection,

    /// Output settings.
    pub report: ReportSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of simulated paths.
    pub simulations: usize,
    /// Discount rate before shocks.
    pub base_discount_rate: f64,
    /// Standard deviation of the per-path rate shock.
    pub rate_shock_std: f64,
    /// Fixed base seed.
    pub seed: Option<u64>,
    /// Confidence level for tail metrics.
    pub confidence_level: f64,
    /// Run paths on the thread pool when built with `parallel`.
    pub parallel: bool,
    /// Minimum path count for parallel execution.
    pub parallel_threshold: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            simulations: defaults.simulations,
            base_discount_rate: defaults.base_discount_rate,
            rate_shock_std: defaults.rate_shock_std,
            seed: defaults.seed,
            confidence_level: defaults.confidence_level,
            parallel: defaults.parallel,
            parallel_threshold: defaults.parallel_threshold,
        }
    }
}

/// `[portfolio]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioSection {
    /// Portfolio name.
    pub name: String,
    /// Loan tranches.
    pub tranches: Vec<TrancheSection>,
}

impl Default for PortfolioSection {
    fn default() -> Self {
        Self {
            name: "Loan Portfolio".to_string(),
            tranches: vec![TrancheSection::default()],
        }
    }
}

/// One `[[portfolio.tranches]]` entry.
///
/// Loan fields default to the standard loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrancheSection {
    /// Tranche label.
    pub name: String,
    /// Number of identical loans.
    pub count: u32,
    /// Original balance per loan.
    pub principal: f64,
    /// Annual coupon.
    pub annual_rate: f64,
    /// Term in years.
    pub term_years: u32,
    /// Annual default probability.
    pub default_probability: f64,
    /// Annual prepayment probability.
    pub prepay_probability: f64,
    /// Recovery on default as a fraction of the remaining balance.
    pub recovery_rate: f64,
}

impl Default for TrancheSection {
    fn default() -> Self {
        Self::from_tranche(&LoanTranche::new("standard", 50, LoanTerms::standard()))
    }
}

impl TrancheSection {
    /// Flattens a tranche.
    #[must_use]
    pub fn from_tranche(tranche: &LoanTranche) -> Self {
        let t = &tranche.terms;
        Self {
            name: tranche.name.clone(),
            count: tranche.count,
            principal: t.principal,
            annual_rate: t.annual_rate,
            term_years: t.term_years,
            default_probability: t.default_probability,
            prepay_probability: t.prepay_probability,
            recovery_rate: t.recovery_rate,
        }
    }

    /// Loan terms of this tranche.
    #[must_use]
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate: self.annual_rate,
            term_years: self.term_years,
            default_probability: self.default_probability,
            prepay_probability: self.prepay_probability,
            recovery_rate: self.recovery_rate,
        }
    }

    /// Converts into a tranche.
    #[must_use]
    pub fn to_tranche(&self) -> LoanTranche {
        LoanTranche::new(self.name.clone(), self.count, self.terms())
    }
}

/// `[stress]` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StressSection {
    /// Custom scenarios; the standard set is used when empty.
    pub scenarios: Vec<StressScenario>,
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Heading of the text report.
    pub title: String,
    /// Number of histogram bins.
    pub histogram_bins: usize,
    /// Print histograms after the summary.
    pub show_histograms: bool,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            histogram_bins: 50,
            show_histograms: false,
        }
    }
}

impl LoanMcConfig {
    /// Reference run: 50 standard loans, 5,000 paths.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Reference portfolio with 500 paths, for fast iteration.
    #[must_use]
    pub fn quick() -> Self {
        let mut config = Self::default();
        config.simulation.simulations = 500;
        config
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replaces the configured tranches, e.g. with a loaded loan tape.
    pub fn set_tranches(&mut self, tranches: &[LoanTranche]) {
        self.portfolio.tranches = tranches.iter().map(TrancheSection::from_tranche).collect();
    }

    /// Builds the configured portfolio.
    pub fn portfolio(&self) -> ConfigResult<Portfolio> {
        Ok(Portfolio::builder()
            .name(self.portfolio.name.clone())
            .add_tranches(self.portfolio.tranches.iter().map(TrancheSection::to_tranche))
            .build()?)
    }

    /// Simulation config for the engine.
    #[must_use]
    pub fn simulation(&self) -> SimulationConfig {
        let s = &self.simulation;
        SimulationConfig {
            simulations: s.simulations,
            base_discount_rate: s.base_discount_rate,
            rate_shock_std: s.rate_shock_std,
            rate_shift: 0.0,
            seed: s.seed,
            sensitivity: self.sensitivity,
            confidence_level: s.confidence_level,
            parallel: s.parallel,
            parallel_threshold: s.parallel_threshold,
        }
    }

    /// Configured stress scenarios, or the standard set when none are given.
    #[must_use]
    pub fn scenarios(&self) -> Vec<StressScenario> {
        if self.stress.scenarios.is_empty() {
            standard::all()
        } else {
            self.stress.scenarios.clone()
        }
    }
}

fn non_negative(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be non-negative and finite, got {value}"),
            "non_negative",
        ));
    }
}

fn unit_interval(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be between 0 and 1, got {value}"),
            "unit_interval",
        ));
    }
}

impl Validate for LoanMcConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let sim = &self.simulation;

        if sim.simulations == 0 {
            errors.push(ValidationError::new(
                "simulation.simulations",
                "must be at least 1",
            ));
        }
        non_negative(&mut errors, "simulation.base_discount_rate", sim.base_discount_rate);
        non_negative(&mut errors, "simulation.rate_shock_std", sim.rate_shock_std);
        if !(sim.confidence_level > 0.0 && sim.confidence_level < 1.0) {
            errors.push(ValidationError::with_rule(
                "simulation.confidence_level",
                format!("must be strictly between 0 and 1, got {}", sim.confidence_level),
                "open_unit_interval",
            ));
        }

        if !self.sensitivity.default_beta.is_finite() {
            errors.push(ValidationError::new("sensitivity.default_beta", "must be finite"));
        }
        if !self.sensitivity.prepay_beta.is_finite() {
            errors.push(ValidationError::new("sensitivity.prepay_beta", "must be finite"));
        }

        if self.portfolio.tranches.is_empty() {
            errors.push(ValidationError::new(
                "portfolio.tranches",
                "at least one tranche is required",
            ));
        }
        for (i, tranche) in self.portfolio.tranches.iter().enumerate() {
            let prefix = format!("portfolio.tranches[{i}]");
            if tranche.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("{prefix}.name"),
                    "cannot be empty",
                ));
            }
            if tranche.count == 0 {
                errors.push(ValidationError::new(
                    format!("{prefix}.count"),
                    "must be at least 1",
                ));
            }
            if !tranche.principal.is_finite() || tranche.principal <= 0.0 {
                errors.push(ValidationError::new(
                    format!("{prefix}.principal"),
                    format!("must be positive, got {}", tranche.principal),
                ));
            }
            non_negative(&mut errors, &format!("{prefix}.annual_rate"), tranche.annual_rate);
            if tranche.term_years == 0 {
                errors.push(ValidationError::new(
                    format!("{prefix}.term_years"),
                    "must be at least 1",
                ));
            }
            unit_interval(
                &mut errors,
                &format!("{prefix}.default_probability"),
                tranche.default_probability,
            );
            unit_interval(
                &mut errors,
                &format!("{prefix}.prepay_probability"),
                tranche.prepay_probability,
            );
            unit_interval(&mut errors, &format!("{prefix}.recovery_rate"), tranche.recovery_rate);
        }

        for (i, scenario) in self.stress.scenarios.iter().enumerate() {
            if let Err(e) = scenario.validate() {
                errors.push(ValidationError::new(
                    format!("stress.scenarios[{i}]"),
                    e.to_string(),
                ));
            }
        }

        if self.report.histogram_bins == 0 {
            errors.push(ValidationError::with_rule(
                "report.histogram_bins",
                "must be at least 1",
                "min_bins",
            ));
        }

        errors
    }
}
