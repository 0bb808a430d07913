//! Monte Carlo valuation engine.
//!
//! Each path draws one rate shock, simulates every loan under it, and
//! discounts the pooled annual cash flows at the shocked discount rate:
//!
//! ```text
//! PV = Σ_{t=1}^{T} CF_t / (1 + max(0, base + shock))^t
//! ```
//!
//! Every path owns an RNG seeded from `(base_seed, path_index)`, so results
//! do not depend on whether paths run sequentially or on the rayon pool.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use loanmc_core::Portfolio;
use loanmc_math::discounting::present_value;
use loanmc_math::histogram::Histogram;
use loanmc_math::statistics::{SummaryStatistics, TailMetrics};

use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::loan::accumulate_loan;
use crate::parallel::maybe_parallel_map;
use crate::shock::{shocked_discount_rate, RateShockModel};

const PROGRESS_INTERVAL: usize = 1_000;

/// Derives the seed of one path from the run seed.
///
/// SplitMix64 finalizer over `base ^ golden * (index + 1)`.
#[must_use]
pub fn path_seed(base: u64, index: usize) -> u64 {
    let mut z = base ^ 0x9E37_79B9_7F4A_7C15_u64.wrapping_mul(index as u64 + 1);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Debug, Clone, Copy)]
struct PathResult {
    value: f64,
    discount_rate: f64,
    defaults: u32,
    prepayments: u32,
}

/// Runs Monte Carlo valuations of loan portfolios.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
    shock: RateShockModel,
}

impl MonteCarloEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        if config.rate_shock_std == 0.0 {
            warn!("rate shock volatility is zero; every path uses the same discount rate");
        }
        let shock = RateShockModel::new(config.rate_shock_std, config.rate_shift)?;
        Ok(Self { config, shock })
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Values `portfolio` over `config.simulations` paths.
    pub fn run(&self, portfolio: &Portfolio) -> SimResult<SimulationOutcome> {
        if portfolio.loan_count() == 0 {
            return Err(SimError::Loan(loanmc_core::LoanError::EmptyPortfolio));
        }

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let run_id = Uuid::new_v4();
        let simulations = self.config.simulations;
        let horizon = portfolio.horizon_years() as usize;

        info!(
            %run_id,
            seed,
            simulations,
            loans = portfolio.loan_count(),
            horizon_years = horizon,
            parallel = self.config.should_parallelize(simulations),
            "starting Monte Carlo valuation"
        );
        let start = Instant::now();

        let paths = maybe_parallel_map(simulations, &self.config, |i| {
            if i > 0 && i % PROGRESS_INTERVAL == 0 {
                debug!(path = i, "simulating");
            }
            self.simulate_path(portfolio, horizon, path_seed(seed, i))
        });

        let mut portfolio_values = Vec::with_capacity(simulations);
        let mut discount_rates = Vec::with_capacity(simulations);
        let mut defaults = 0_u64;
        let mut prepayments = 0_u64;
        for path in paths {
            let path = path?;
            portfolio_values.push(path.value);
            discount_rates.push(path.discount_rate);
            defaults += u64::from(path.defaults);
            prepayments += u64::from(path.prepayments);
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;
        info!(%run_id, elapsed_ms, defaults, prepayments, "Monte Carlo valuation finished");

        Ok(SimulationOutcome {
            run_id,
            seed,
            loan_count: portfolio.loan_count(),
            horizon_years: portfolio.horizon_years(),
            portfolio_values,
            discount_rates,
            defaults,
            prepayments,
            elapsed_ms,
        })
    }

    fn simulate_path(
        &self,
        portfolio: &Portfolio,
        horizon: usize,
        seed: u64,
    ) -> SimResult<PathResult> {
        let mut rng = StdRng::seed_from_u64(seed);
        let shock = self.shock.sample(&mut rng);
        let discount_rate = shocked_discount_rate(self.config.base_discount_rate, shock);

        let mut cash_flows = vec![0.0; horizon];
        let mut defaults = 0;
        let mut prepayments = 0;
        for terms in portfolio.loans() {
            let outcome = accumulate_loan(
                terms,
                shock,
                &self.config.sensitivity,
                &mut rng,
                &mut cash_flows,
            )?;
            if outcome.is_default() {
                defaults += 1;
            } else if outcome.is_prepayment() {
                prepayments += 1;
            }
        }

        Ok(PathResult {
            value: present_value(&cash_flows, discount_rate)?,
            discount_rate,
            defaults,
            prepayments,
        })
    }
}

/// Raw output of one Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Identifier of this run, for log correlation.
    pub run_id: Uuid,
    /// Base seed actually used.
    pub seed: u64,
    /// Number of loans in the valued portfolio.
    pub loan_count: u32,
    /// Longest loan term in years.
    pub horizon_years: u32,
    /// Present value of the portfolio on each path.
    pub portfolio_values: Vec<f64>,
    /// Shocked discount rate of each path.
    pub discount_rates: Vec<f64>,
    /// Loan defaults summed over all paths.
    pub defaults: u64,
    /// Loan prepayments summed over all paths.
    pub prepayments: u64,
    /// Wall-clock run time.
    pub elapsed_ms: f64,
}

impl SimulationOutcome {
    /// Number of simulated paths.
    #[must_use]
    pub fn simulations(&self) -> usize {
        self.portfolio_values.len()
    }

    /// Summary of the portfolio value distribution.
    pub fn summary(&self) -> SimResult<SummaryStatistics> {
        Ok(SummaryStatistics::from_values(&self.portfolio_values)?)
    }

    /// Tail metrics of the portfolio value distribution.
    pub fn tail_metrics(&self, confidence: f64) -> SimResult<TailMetrics> {
        Ok(TailMetrics::from_values(&self.portfolio_values, confidence)?)
    }

    /// Summary of the simulated discount rates.
    pub fn discount_rate_summary(&self) -> SimResult<SummaryStatistics> {
        Ok(SummaryStatistics::from_values(&self.discount_rates)?)
    }

    /// Histogram of portfolio values.
    pub fn value_histogram(&self, bins: usize) -> SimResult<Histogram> {
        Ok(Histogram::new(&self.portfolio_values, bins)?)
    }

    /// Histogram of discount rates.
    pub fn discount_rate_histogram(&self, bins: usize) -> SimResult<Histogram> {
        Ok(Histogram::new(&self.discount_rates, bins)?)
    }

    /// Share of loan-paths that defaulted.
    #[must_use]
    pub fn default_rate(&self) -> f64 {
        self.event_rate(self.defaults)
    }

    /// Share of loan-paths that prepaid.
    #[must_use]
    pub fn prepayment_rate(&self) -> f64 {
        self.event_rate(self.prepayments)
    }

    fn event_rate(&self, events: u64) -> f64 {
        let exposures = self.simulations() as f64 * f64::from(self.loan_count);
        if exposures == 0.0 {
            0.0
        } else {
            events as f64 / exposures
        }
    }
}
