//! Error types for loan and portfolio construction.

use thiserror::Error;

/// A specialized Result type for loan and portfolio operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// Errors raised while describing loans and portfolios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// A loan term is out of its valid range.
    #[error("Invalid loan terms: {field} {reason}")]
    InvalidTerms {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Portfolio contains no loans.
    #[error("Portfolio has no loans")]
    EmptyPortfolio,

    /// Portfolio is structurally invalid.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// Description of the problem.
        reason: String,
    },

    /// A currency amount could not be represented.
    #[error("Invalid amount: {value}")]
    InvalidAmount {
        /// The rejected value, as text.
        value: String,
    },
}

impl LoanError {
    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }
}
