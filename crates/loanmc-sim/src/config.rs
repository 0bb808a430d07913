//! Configuration for a Monte Carlo run.

use serde::{Deserialize, Serialize};

use loanmc_core::RateSensitivity;

use crate::error::{SimError, SimResult};

/// Configuration for a Monte Carlo valuation run.
///
/// Defaults reproduce the reference run: 5,000 paths, 8% base discount rate
/// and 2% rate-shock volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated paths.
    pub simulations: usize,

    /// Discount rate before shocks.
    pub base_discount_rate: f64,

    /// Standard deviation of the per-path rate shock.
    pub rate_shock_std: f64,

    /// Deterministic shift added to every shock (used by stress scenarios).
    #[serde(default)]
    pub rate_shift: f64,

    /// Base seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,

    /// Borrower response to rate shocks.
    #[serde(default)]
    pub sensitivity: RateSensitivity,

    /// Confidence level for tail metrics.
    pub confidence_level: f64,

    /// Enable parallel processing (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum path count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulations: 5_000,
            base_discount_rate: 0.08,
            rate_shock_std: 0.02,
            rate_shift: 0.0,
            seed: None,
            sensitivity: RateSensitivity::default(),
            confidence_level: 0.95,
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

impl SimulationConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always runs paths sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the number of paths.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    /// Sets the base discount rate.
    #[must_use]
    pub fn with_base_discount_rate(mut self, rate: f64) -> Self {
        self.base_discount_rate = rate;
        self
    }

    /// Sets the rate-shock volatility.
    #[must_use]
    pub fn with_rate_shock_std(mut self, std: f64) -> Self {
        self.rate_shock_std = std;
        self
    }

    /// Sets the deterministic rate shift.
    #[must_use]
    pub fn with_rate_shift(mut self, shift: f64) -> Self {
        self.rate_shift = shift;
        self
    }

    /// Fixes the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the borrower rate sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: RateSensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Sets the tail-metric confidence level.
    #[must_use]
    pub fn with_confidence_level(mut self, confidence: f64) -> Self {
        self.confidence_level = confidence;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> SimResult<()> {
        if self.simulations == 0 {
            return Err(SimError::invalid_input("simulations must be at least 1"));
        }
        if !self.base_discount_rate.is_finite() || self.base_discount_rate < 0.0 {
            return Err(SimError::invalid_input(format!(
                "base discount rate must be non-negative, got {}",
                self.base_discount_rate
            )));
        }
        if !self.rate_shock_std.is_finite() || self.rate_shock_std < 0.0 {
            return Err(SimError::invalid_input(format!(
                "rate shock volatility must be non-negative, got {}",
                self.rate_shock_std
            )));
        }
        if !self.rate_shift.is_finite() {
            return Err(SimError::invalid_input("rate shift must be finite"));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(SimError::invalid_input(format!(
                "confidence level must be strictly between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        if !self.sensitivity.default_beta.is_finite() || !self.sensitivity.prepay_beta.is_finite()
        {
            return Err(SimError::invalid_input("rate sensitivities must be finite"));
        }
        Ok(())
    }
}
