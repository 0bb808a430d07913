//! loanmc Configuration Layer
//!
//! Loads run settings, portfolios and stress scenarios from TOML, and loan
//! tapes from CSV.
//!
//! # Example
//!
//! ```rust
//! use loanmc_config::LoanMcConfig;
//!
//! let config = LoanMcConfig::from_toml_str(r#"
//!     [simulation]
//!     simulations = 1000
//!     seed = 42
//! "#).unwrap();
//!
//! let portfolio = config.portfolio().unwrap();
//! assert_eq!(portfolio.loan_count(), 50);
//! assert_eq!(config.simulation().seed, Some(42));
//! ```
//!
//! # Precedence
//!
//! Built-in defaults are overridden by the TOML file, which command-line
//! flags override in turn. A loan tape replaces the configured tranches.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod schema;
pub mod tape;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use schema::{
    LoanMcConfig, PortfolioSection, ReportSection, SimulationSection, StressSection,
    TrancheSection,
};
pub use tape::{load_loan_tape, read_loan_tape};
