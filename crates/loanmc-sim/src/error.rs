//! Error types for simulation.

use loanmc_core::LoanError;
use loanmc_math::MathError;
use thiserror::Error;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while configuring or running a simulation.
#[derive(Error, Debug, Clone)]
pub enum SimError {
    /// A simulation parameter is out of range.
    #[error("Invalid simulation input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// A probability distribution could not be constructed.
    #[error("Distribution error: {reason}")]
    Distribution {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid loan or portfolio.
    #[error(transparent)]
    Loan(#[from] LoanError),

    /// Numerical failure.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl SimError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a distribution error.
    #[must_use]
    pub fn distribution(reason: impl Into<String>) -> Self {
        Self::Distribution {
            reason: reason.into(),
        }
    }
}
