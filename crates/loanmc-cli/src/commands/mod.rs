//! CLI command implementations.

pub mod config;
pub mod schedule;
pub mod simulate;
pub mod stress;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use schedule::ScheduleArgs;
pub use simulate::SimulateArgs;
pub use stress::StressArgs;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use loanmc_config::{load_loan_tape, LoanMcConfig, Validate};

use crate::error::{CliError, CliResult};

/// Default configuration file, `<config dir>/loanmc/config.toml`.
pub fn default_config_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoConfigDir)?;
    Ok(base.join("loanmc").join("config.toml"))
}

/// Loads settings from `path`, the default file if it exists, or built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<LoanMcConfig> {
    if let Some(path) = path {
        return LoanMcConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    match default_config_path() {
        Ok(path) if path.exists() => {
            debug!(path = %path.display(), "using default configuration file");
            LoanMcConfig::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        _ => Ok(LoanMcConfig::standard()),
    }
}

/// Portfolio and simulation overrides shared by `simulate` and `stress`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of loans (single-tranche portfolios only)
    #[arg(long)]
    pub loans: Option<u32>,

    /// CSV loan tape replacing the configured portfolio
    #[arg(long, conflicts_with = "loans")]
    pub tape: Option<PathBuf>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// Principal per loan
    #[arg(long)]
    pub principal: Option<f64>,

    /// Annual loan rate as a decimal (0.10 = 10%)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Annual default probability
    #[arg(long = "default-prob")]
    pub default_prob: Option<f64>,

    /// Annual prepayment probability
    #[arg(long = "prepay-prob")]
    pub prepay_prob: Option<f64>,

    /// Recovery on default as a fraction of the remaining balance
    #[arg(long)]
    pub recovery: Option<f64>,

    /// Base discount rate as a decimal
    #[arg(long = "discount-rate")]
    pub discount_rate: Option<f64>,

    /// Standard deviation of the rate shock
    #[arg(long = "shock-std")]
    pub shock_std: Option<f64>,

    /// Random seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run every path on the current thread
    #[arg(long)]
    pub sequential: bool,
}

impl RunArgs {
    /// Applies the overrides on top of `settings` and re-validates.
    pub fn apply(&self, settings: &mut LoanMcConfig) -> Result<()> {
        if let Some(ref tape) = self.tape {
            let tranches = load_loan_tape(tape)
                .with_context(|| format!("Failed to load loan tape {}", tape.display()))?;
            settings.set_tranches(&tranches);
        }

        if let Some(loans) = self.loans {
            match settings.portfolio.tranches.as_mut_slice() {
                [only] => only.count = loans,
                _ => {
                    return Err(CliError::InvalidArgument(
                        "--loans needs a single-tranche portfolio".to_string(),
                    )
                    .into())
                }
            }
        }

        for tranche in &mut settings.portfolio.tranches {
            if let Some(principal) = self.principal {
                tranche.principal = principal;
            }
            if let Some(rate) = self.rate {
                tranche.annual_rate = rate;
            }
            if let Some(term) = self.term {
                tranche.term_years = term;
            }
            if let Some(p) = self.default_prob {
                tranche.default_probability = p;
            }
            if let Some(p) = self.prepay_prob {
                tranche.prepay_probability = p;
            }
            if let Some(r) = self.recovery {
                tranche.recovery_rate = r;
            }
        }

        let sim = &mut settings.simulation;
        if let Some(n) = self.simulations {
            sim.simulations = n;
        }
        if let Some(rate) = self.discount_rate {
            sim.base_discount_rate = rate;
        }
        if let Some(std) = self.shock_std {
            sim.rate_shock_std = std;
        }
        if self.seed.is_some() {
            sim.seed = self.seed;
        }
        if self.sequential {
            sim.parallel = false;
        }

        settings.validate_or_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_to_reference_book() {
        let mut settings = LoanMcConfig::standard();
        let args = RunArgs {
            loans: Some(10),
            simulations: Some(100),
            rate: Some(0.12),
            seed: Some(3),
            sequential: true,
            ..RunArgs::default()
        };
        args.apply(&mut settings).unwrap();

        assert_eq!(settings.portfolio.tranches[0].count, 10);
        assert_eq!(settings.portfolio.tranches[0].annual_rate, 0.12);
        assert_eq!(settings.simulation.simulations, 100);
        assert_eq!(settings.simulation.seed, Some(3));
        assert!(!settings.simulation.parallel);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut settings = LoanMcConfig::standard();
        let args = RunArgs {
            default_prob: Some(1.5),
            ..RunArgs::default()
        };
        assert!(args.apply(&mut settings).is_err());
    }

    #[test]
    fn test_loans_needs_single_tranche() {
        let mut settings = LoanMcConfig::standard();
        let extra = settings.portfolio.tranches[0].clone();
        settings.portfolio.tranches.push(extra);

        let args = RunArgs {
            loans: Some(5),
            ..RunArgs::default()
        };
        assert!(args.apply(&mut settings).is_err());
    }
}
