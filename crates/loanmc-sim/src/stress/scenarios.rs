//! Stress scenario definitions.
//!
//! A scenario moves the market (a parallel rate shift and a volatility
//! multiplier) and the credit behaviour of the book (multipliers on default
//! and prepayment probabilities). Applying it yields a stressed portfolio and
//! a stressed simulation config; the Monte Carlo engine is then re-run.

use serde::{Deserialize, Serialize};

use loanmc_core::Portfolio;

use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};

fn one() -> f64 {
    1.0
}

/// A deterministic stress applied on top of the random rate shocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario name.
    pub name: String,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Parallel rate shift in basis points (positive = rates up).
    #[serde(default)]
    pub rate_shift_bps: f64,

    /// Multiplier on the rate-shock volatility.
    #[serde(default = "one")]
    pub volatility_multiplier: f64,

    /// Multiplier on every loan's default probability.
    #[serde(default = "one")]
    pub default_multiplier: f64,

    /// Multiplier on every loan's prepayment probability.
    #[serde(default = "one")]
    pub prepay_multiplier: f64,
}

impl StressScenario {
    /// Creates a scenario that changes nothing.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate_shift_bps: 0.0,
            volatility_multiplier: 1.0,
            default_multiplier: 1.0,
            prepay_multiplier: 1.0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the parallel rate shift (bps).
    #[must_use]
    pub fn with_rate_shift_bps(mut self, bps: f64) -> Self {
        self.rate_shift_bps = bps;
        self
    }

    /// Sets the volatility multiplier.
    #[must_use]
    pub fn with_volatility_multiplier(mut self, multiplier: f64) -> Self {
        self.volatility_multiplier = multiplier;
        self
    }

    /// Sets the default-probability multiplier.
    #[must_use]
    pub fn with_default_multiplier(mut self, multiplier: f64) -> Self {
        self.default_multiplier = multiplier;
        self
    }

    /// Sets the prepayment-probability multiplier.
    #[must_use]
    pub fn with_prepay_multiplier(mut self, multiplier: f64) -> Self {
        self.prepay_multiplier = multiplier;
        self
    }

    /// Rate shift as a decimal (100 bps = 0.01).
    #[must_use]
    pub fn rate_shift(&self) -> f64 {
        self.rate_shift_bps / 10_000.0
    }

    /// Returns true if applying this scenario changes nothing.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.rate_shift_bps == 0.0
            && self.volatility_multiplier == 1.0
            && self.default_multiplier == 1.0
            && self.prepay_multiplier == 1.0
    }

    /// Checks that the scenario can be applied.
    pub fn validate(&self) -> SimResult<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::invalid_input("stress scenario name is empty"));
        }
        if !self.rate_shift_bps.is_finite() {
            return Err(SimError::invalid_input(format!(
                "scenario '{}': rate shift must be finite",
                self.name
            )));
        }
        for (field, value) in [
            ("volatility_multiplier", self.volatility_multiplier),
            ("default_multiplier", self.default_multiplier),
            ("prepay_multiplier", self.prepay_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::invalid_input(format!(
                    "scenario '{}': {field} must be non-negative, got {value}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the portfolio with stressed default and prepayment probabilities.
    ///
    /// Scaled probabilities are clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(&self, portfolio: &Portfolio) -> Portfolio {
        portfolio.map_terms(|terms| {
            terms
                .with_default_probability(
                    (terms.default_probability * self.default_multiplier).clamp(0.0, 1.0),
                )
                .with_prepay_probability(
                    (terms.prepay_probability * self.prepay_multiplier).clamp(0.0, 1.0),
                )
        })
    }

    /// Returns the simulation config with the rate shift added and the
    /// volatility scaled.
    #[must_use]
    pub fn apply_config(&self, config: &SimulationConfig) -> SimulationConfig {
        let mut stressed = config.clone();
        stressed.rate_shift += self.rate_shift();
        stressed.rate_shock_std *= self.volatility_multiplier;
        stressed
    }
}

/// Standard loan-book stress scenarios.
pub mod standard {
    use super::*;

    /// Unstressed reference run.
    #[must_use]
    pub fn baseline() -> StressScenario {
        StressScenario::new("Baseline").with_description("No stress applied")
    }

    /// +100bp parallel shift.
    #[must_use]
    pub fn rates_up_100() -> StressScenario {
        StressScenario::new("Rates +100bp")
            .with_description("Parallel shift up 100 basis points")
            .with_rate_shift_bps(100.0)
    }

    /// -100bp parallel shift.
    #[must_use]
    pub fn rates_down_100() -> StressScenario {
        StressScenario::new("Rates -100bp")
            .with_description("Parallel shift down 100 basis points")
            .with_rate_shift_bps(-100.0)
    }

    /// +200bp parallel shift.
    #[must_use]
    pub fn rates_up_200() -> StressScenario {
        StressScenario::new("Rates +200bp")
            .with_description("Parallel shift up 200 basis points")
            .with_rate_shift_bps(200.0)
    }

    /// Doubled rate-shock volatility.
    #[must_use]
    pub fn high_volatility() -> StressScenario {
        StressScenario::new("High Volatility")
            .with_description("Rate shock volatility doubled")
            .with_volatility_multiplier(2.0)
    }

    /// Doubled default probabilities.
    #[must_use]
    pub fn credit_stress() -> StressScenario {
        StressScenario::new("Credit Stress")
            .with_description("Default probabilities doubled")
            .with_default_multiplier(2.0)
    }

    /// Falling rates with borrowers refinancing.
    #[must_use]
    pub fn refinancing_wave() -> StressScenario {
        StressScenario::new("Refinancing Wave")
            .with_description("Rates down 150bp, prepayment probabilities doubled")
            .with_rate_shift_bps(-150.0)
            .with_prepay_multiplier(2.0)
    }

    /// Rising rates, tripled defaults and halved prepayments.
    #[must_use]
    pub fn severe_recession() -> StressScenario {
        StressScenario::new("Severe Recession")
            .with_description("Rates up 200bp, defaults tripled, prepayments halved")
            .with_rate_shift_bps(200.0)
            .with_default_multiplier(3.0)
            .with_prepay_multiplier(0.5)
    }

    /// All standard scenarios, baseline first.
    #[must_use]
    pub fn all() -> Vec<StressScenario> {
        vec![
            baseline(),
            rates_up_100(),
            rates_down_100(),
            rates_up_200(),
            high_volatility(),
            credit_stress(),
            refinancing_wave(),
            severe_recession(),
        ]
    }
}
