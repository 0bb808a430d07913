//! # loanmc Simulation
//!
//! Monte Carlo discounted-cash-flow valuation of loan portfolios under
//! interest-rate shocks, with deterministic stress testing.
//!
//! ## Design Philosophy
//!
//! - **One shock per path**: each path draws a single parallel rate shock that
//!   moves loan coupons, borrower behaviour and the discount rate together
//! - **Seed per path**: path `i` owns an RNG derived from `(seed, i)`, so a run
//!   is reproducible whether or not it executes on the rayon pool
//! - **Common random numbers**: stress scenarios reuse the baseline seed
//!
//! ## Quick Start
//!
//! ```rust
//! use loanmc_core::{LoanTerms, Portfolio};
//! use loanmc_sim::prelude::*;
//!
//! let portfolio = Portfolio::homogeneous(50, LoanTerms::standard()).unwrap();
//! let config = SimulationConfig::default().with_simulations(200).with_seed(42);
//!
//! let outcome = MonteCarloEngine::new(config).unwrap().run(&portfolio).unwrap();
//! let report = ValuationReport::new(&portfolio, &outcome, 0.95).unwrap();
//! println!("{}", report.render_text().unwrap());
//! ```
//!
//! ## Module Overview
//!
//! - [`loan`] - Single-loan cash-flow paths and amortization schedules
//! - [`shock`] - Normal rate-shock model
//! - [`engine`] - Monte Carlo engine and run outcome
//! - [`report`] - Valuation report and plain-text rendering
//! - [`stress`] - Stress scenarios and impact analysis
//!
//! ## Feature Flags
//!
//! - `parallel`: Run paths on the rayon thread pool above a configurable path count

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod engine;
pub mod error;
pub mod loan;
pub mod parallel;
pub mod report;
pub mod shock;
pub mod stress;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::SimulationConfig;
    pub use crate::engine::{MonteCarloEngine, SimulationOutcome};
    pub use crate::error::{SimError, SimResult};
    pub use crate::loan::{amortization_schedule, simulate_loan, LoanOutcome, LoanPath};
    pub use crate::report::{ValuationReport, REPORT_TITLE};
    pub use crate::shock::RateShockModel;
    pub use crate::stress::{
        run_stress_scenarios, summarize_results, worst_case, StressResult, StressScenario,
        StressSummary,
    };
}

pub use config::SimulationConfig;
pub use engine::{MonteCarloEngine, SimulationOutcome};
pub use error::{SimError, SimResult};
pub use report::ValuationReport;
pub use stress::{StressResult, StressScenario};
