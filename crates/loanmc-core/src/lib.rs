//! # loanmc Core
//!
//! Core loan and portfolio types for the loanmc Monte Carlo valuation library.
//!
//! This crate provides the building blocks shared by the simulation engine,
//! the configuration layer and the CLI:
//!
//! - **Loans**: [`LoanTerms`] describing an amortizing loan and its annual
//!   default/prepayment propensities
//! - **Portfolios**: [`LoanTranche`] groups of identical loans assembled into a
//!   [`Portfolio`] through [`PortfolioBuilder`]
//! - **Behaviour**: [`RateSensitivity`] linking rate shocks to borrower behaviour
//! - **Money**: [`Money`] for cent-rounded reporting of currency amounts
//!
//! ## Example
//!
//! ```rust
//! use loanmc_core::prelude::*;
//!
//! let portfolio = Portfolio::homogeneous(50, LoanTerms::standard()).unwrap();
//! assert_eq!(portfolio.loan_count(), 50);
//! assert_eq!(portfolio.horizon_years(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{LoanError, LoanResult};
    pub use crate::types::{
        LoanTerms, LoanTranche, Money, Portfolio, PortfolioBuilder, RateSensitivity,
    };
}

// Re-export commonly used types at crate root
pub use error::{LoanError, LoanResult};
pub use types::{LoanTerms, LoanTranche, Money, Portfolio, PortfolioBuilder, RateSensitivity};
