//! Stress testing for loan portfolios.
//!
//! Scenarios shift rates, scale rate volatility and scale borrower default
//! and prepayment behaviour. Each scenario is a full Monte Carlo re-run
//! sharing the baseline's seed.

mod impact;
mod scenarios;

pub use impact::*;
pub use scenarios::*;
