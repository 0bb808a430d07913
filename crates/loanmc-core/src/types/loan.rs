//! Loan terms.

use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};

/// Contractual terms and behavioural assumptions for an amortizing loan.
///
/// Payments are annual and level over `term_years`. The probabilities are
/// per-year: each year a performing loan either defaults, prepays in full, or
/// keeps paying.
///
/// # Example
///
/// ```rust
/// use loanmc_core::LoanTerms;
///
/// let terms = LoanTerms::standard()
///     .with_principal(25_000.0)
///     .with_term_years(5);
/// assert!(terms.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original balance.
    pub principal: f64,

    /// Annual coupon rate as a decimal (0.10 = 10%).
    pub annual_rate: f64,

    /// Number of annual payments.
    pub term_years: u32,

    /// Annual probability of default.
    pub default_probability: f64,

    /// Annual probability of full prepayment.
    pub prepay_probability: f64,

    /// Fraction of the remaining balance recovered in the year of default.
    #[serde(default)]
    pub recovery_rate: f64,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self::standard()
    }
}

impl LoanTerms {
    /// Creates loan terms with no default/prepayment risk and no recovery.
    #[must_use]
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            default_probability: 0.0,
            prepay_probability: 0.0,
            recovery_rate: 0.0,
        }
    }

    /// $10,000 at 10% over 10 years, 2% annual default, 5% annual prepayment.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            principal: 10_000.0,
            annual_rate: 0.10,
            term_years: 10,
            default_probability: 0.02,
            prepay_probability: 0.05,
            recovery_rate: 0.0,
        }
    }

    /// Sets the principal.
    #[must_use]
    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the annual coupon rate.
    #[must_use]
    pub fn with_annual_rate(mut self, rate: f64) -> Self {
        self.annual_rate = rate;
        self
    }

    /// Sets the term in years.
    #[must_use]
    pub fn with_term_years(mut self, years: u32) -> Self {
        self.term_years = years;
        self
    }

    /// Sets the annual default probability.
    #[must_use]
    pub fn with_default_probability(mut self, p: f64) -> Self {
        self.default_probability = p;
        self
    }

    /// Sets the annual prepayment probability.
    #[must_use]
    pub fn with_prepay_probability(mut self, p: f64) -> Self {
        self.prepay_probability = p;
        self
    }

    /// Sets the recovery rate applied on default.
    #[must_use]
    pub fn with_recovery_rate(mut self, rate: f64) -> Self {
        self.recovery_rate = rate;
        self
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> LoanResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(LoanError::invalid_terms(
                "principal",
                format!("must be positive and finite, got {}", self.principal),
            ));
        }
        if !self.annual_rate.is_finite() || self.annual_rate < 0.0 {
            return Err(LoanError::invalid_terms(
                "annual_rate",
                format!("must be non-negative, got {}", self.annual_rate),
            ));
        }
        if self.term_years == 0 {
            return Err(LoanError::invalid_terms(
                "term_years",
                "must be at least 1",
            ));
        }
        check_unit_interval("default_probability", self.default_probability)?;
        check_unit_interval("prepay_probability", self.prepay_probability)?;
        check_unit_interval("recovery_rate", self.recovery_rate)?;
        Ok(())
    }
}

fn check_unit_interval(field: &str, value: f64) -> LoanResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LoanError::invalid_terms(
            field,
            format!("must be between 0 and 1, got {value}"),
        ))
    }
}
