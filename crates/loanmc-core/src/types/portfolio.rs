//! Loan portfolios.

use serde::{Deserialize, Serialize};

use super::LoanTerms;
use crate::error::{LoanError, LoanResult};

/// A group of identical loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTranche {
    /// Tranche label.
    pub name: String,

    /// Number of loans in the tranche.
    pub count: u32,

    /// Terms shared by every loan in the tranche.
    pub terms: LoanTerms,
}

impl LoanTranche {
    /// Creates a new tranche.
    #[must_use]
    pub fn new(name: impl Into<String>, count: u32, terms: LoanTerms) -> Self {
        Self {
            name: name.into(),
            count,
            terms,
        }
    }

    /// Total original balance of the tranche.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.terms.principal * f64::from(self.count)
    }
}

/// A validated portfolio of loan tranches.
///
/// Construct through [`PortfolioBuilder`] so that every tranche is checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    /// Portfolio name.
    pub name: String,

    tranches: Vec<LoanTranche>,
}

impl Portfolio {
    /// Starts building a portfolio.
    #[must_use]
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    /// Portfolio of `count` loans with identical terms.
    pub fn homogeneous(count: u32, terms: LoanTerms) -> LoanResult<Self> {
        PortfolioBuilder::new()
            .add_tranche(LoanTranche::new("loans", count, terms))
            .build()
    }

    /// Tranches in insertion order.
    #[must_use]
    pub fn tranches(&self) -> &[LoanTranche] {
        &self.tranches
    }

    /// Total number of loans.
    #[must_use]
    pub fn loan_count(&self) -> u32 {
        self.tranches.iter().map(|t| t.count).sum()
    }

    /// Longest loan term, which bounds the cash-flow horizon.
    #[must_use]
    pub fn horizon_years(&self) -> u32 {
        self.tranches
            .iter()
            .map(|t| t.terms.term_years)
            .max()
            .unwrap_or(0)
    }

    /// Sum of original balances.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.tranches.iter().map(LoanTranche::total_principal).sum()
    }

    /// Iterates over every individual loan, tranche by tranche.
    pub fn loans(&self) -> impl Iterator<Item = &LoanTerms> + '_ {
        self.tranches
            .iter()
            .flat_map(|t| std::iter::repeat(&t.terms).take(t.count as usize))
    }

    /// Returns a copy with every loan's terms transformed by `f`.
    ///
    /// The result is not re-validated; callers that can produce out-of-range
    /// terms should clamp inside `f`.
    #[must_use]
    pub fn map_terms<F>(&self, f: F) -> Self
    where
        F: Fn(&LoanTerms) -> LoanTerms,
    {
        Self {
            name: self.name.clone(),
            tranches: self
                .tranches
                .iter()
                .map(|t| LoanTranche::new(t.name.clone(), t.count, f(&t.terms)))
                .collect(),
        }
    }
}

/// Builder for [`Portfolio`].
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    tranches: Vec<LoanTranche>,
}

impl PortfolioBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a tranche.
    #[must_use]
    pub fn add_tranche(mut self, tranche: LoanTranche) -> Self {
        self.tranches.push(tranche);
        self
    }

    /// Adds several tranches.
    #[must_use]
    pub fn add_tranches(mut self, tranches: impl IntoIterator<Item = LoanTranche>) -> Self {
        self.tranches.extend(tranches);
        self
    }

    /// Validates every tranche and builds the portfolio.
    pub fn build(self) -> LoanResult<Portfolio> {
        if self.tranches.is_empty() {
            return Err(LoanError::EmptyPortfolio);
        }

        for tranche in &self.tranches {
            if tranche.name.trim().is_empty() {
                return Err(LoanError::invalid_portfolio("tranche name cannot be empty"));
            }
            tranche.terms.validate().map_err(|e| {
                LoanError::invalid_portfolio(format!("tranche '{}': {e}", tranche.name))
            })?;
        }

        let portfolio = Portfolio {
            name: self.name.unwrap_or_else(|| "Loan Portfolio".to_string()),
            tranches: self.tranches,
        };

        if portfolio.loan_count() == 0 {
            return Err(LoanError::EmptyPortfolio);
        }

        Ok(portfolio)
    }
}
