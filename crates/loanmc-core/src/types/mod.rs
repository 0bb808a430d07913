//! Domain types for loans and loan portfolios.

mod loan;
mod money;
mod portfolio;
mod sensitivity;

pub use loan::LoanTerms;
pub use money::Money;
pub use portfolio::{LoanTranche, Portfolio, PortfolioBuilder};
pub use sensitivity::RateSensitivity;
