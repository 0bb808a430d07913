//! # loanmc Math
//!
//! Numerical utilities for the loanmc Monte Carlo valuation library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, median, population standard deviation, quantiles
//!   and tail-risk metrics over simulated outcomes
//! - **Histograms**: Equal-width binning of simulated distributions
//! - **Discounting**: Discount factors, present values and level annuity payments
//!
//! ## Design Philosophy
//!
//! - **Checked inputs**: Empty or non-finite samples are errors, never `NaN` results
//! - **Familiar conventions**: Quantiles interpolate linearly between order
//!   statistics, the convention most analysts compare against

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]

pub mod discounting;
pub mod error;
pub mod histogram;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discounting::{discount_factor, level_payment, present_value};
    pub use crate::error::{MathError, MathResult};
    pub use crate::histogram::{Bin, Histogram};
    pub use crate::statistics::{
        mean, median, percentile, population_std_dev, quantile, SummaryStatistics, TailMetrics,
    };
}

pub use error::{MathError, MathResult};
