//! Single-loan cash-flow simulation.
//!
//! A loan pays a level annual annuity at its (shocked) coupon. Each year that
//! it is still performing, one uniform draw `u` decides its fate:
//!
//! ```text
//! u < p_default                → default: this year's payment plus recovery, then nothing
//! u < p_default + p_prepay     → prepayment: this year's payment plus the remaining balance
//! otherwise                    → keep amortizing
//! ```
//!
//! The shocked `p_default` is not floored at zero, so a large enough rate cut
//! also narrows the prepayment band.

use rand::Rng;
use serde::{Deserialize, Serialize};

use loanmc_core::{LoanTerms, RateSensitivity};
use loanmc_math::discounting::level_payment;

use crate::error::{SimError, SimResult};

/// How a simulated loan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanOutcome {
    /// Paid every scheduled installment.
    Matured,
    /// Defaulted after receiving the payment of `year`.
    Defaulted {
        /// Year of default (1-based).
        year: u32,
    },
    /// Repaid in full in `year`.
    Prepaid {
        /// Year of prepayment (1-based).
        year: u32,
    },
}

impl LoanOutcome {
    /// Returns true for a default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    /// Returns true for a prepayment.
    #[must_use]
    pub fn is_prepayment(&self) -> bool {
        matches!(self, Self::Prepaid { .. })
    }
}

/// Annual cash flows of one simulated loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPath {
    /// Cash flow received at the end of each year, one entry per year of term.
    pub cash_flows: Vec<f64>,
    /// How the loan ended.
    pub outcome: LoanOutcome,
}

impl LoanPath {
    /// Undiscounted total received.
    #[must_use]
    pub fn total_received(&self) -> f64 {
        self.cash_flows.iter().sum()
    }
}

/// Simulates one loan under a rate shock.
///
/// The effective coupon is `max(0, annual_rate + shock)` and the event
/// probabilities respond to `shock` through `sensitivity`.
pub fn simulate_loan<R: Rng + ?Sized>(
    terms: &LoanTerms,
    shock: f64,
    sensitivity: &RateSensitivity,
    rng: &mut R,
) -> SimResult<LoanPath> {
    let mut cash_flows = vec![0.0; terms.term_years as usize];
    let outcome = accumulate_loan(terms, shock, sensitivity, rng, &mut cash_flows)?;
    Ok(LoanPath {
        cash_flows,
        outcome,
    })
}

/// Simulates one loan and adds its cash flows into `buffer`.
///
/// `buffer[t]` receives the cash flow of year `t + 1`. The buffer must cover
/// the loan's full term.
pub fn accumulate_loan<R: Rng + ?Sized>(
    terms: &LoanTerms,
    shock: f64,
    sensitivity: &RateSensitivity,
    rng: &mut R,
    buffer: &mut [f64],
) -> SimResult<LoanOutcome> {
    if buffer.len() < terms.term_years as usize {
        return Err(SimError::invalid_input(format!(
            "cash-flow buffer covers {} years but the loan runs {}",
            buffer.len(),
            terms.term_years
        )));
    }

    let rate = (terms.annual_rate + shock).max(0.0);
    let (default_below, prepay_below) =
        sensitivity.event_thresholds(terms.default_probability, terms.prepay_probability, shock);

    let mut payment = level_payment(terms.principal, rate, terms.term_years)?;
    let mut outstanding = terms.principal;

    for (year, slot) in (1..=terms.term_years).zip(buffer.iter_mut()) {
        if outstanding <= 0.0 {
            break;
        }

        let interest = outstanding * rate;
        let mut principal_paid = payment - interest;
        if principal_paid > outstanding {
            // final installment only clears what is left
            principal_paid = outstanding;
            payment = interest + principal_paid;
        }

        let remaining = outstanding - principal_paid;
        let u: f64 = rng.gen();

        if u < default_below {
            *slot += payment + terms.recovery_rate * remaining;
            return Ok(LoanOutcome::Defaulted { year });
        }
        if u < prepay_below {
            *slot += payment + remaining;
            return Ok(LoanOutcome::Prepaid { year });
        }

        *slot += payment;
        outstanding = remaining;
    }

    Ok(LoanOutcome::Matured)
}

/// One row of a deterministic amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Year (1-based).
    pub year: u32,
    /// Total installment.
    pub payment: f64,
    /// Interest portion.
    pub interest: f64,
    /// Principal portion.
    pub principal: f64,
    /// Balance after the installment.
    pub outstanding: f64,
}

/// Contractual amortization schedule with no default or prepayment.
///
/// `shock` moves the coupon exactly as in [`simulate_loan`].
pub fn amortization_schedule(terms: &LoanTerms, shock: f64) -> SimResult<Vec<ScheduleRow>> {
    terms.validate()?;

    let rate = (terms.annual_rate + shock).max(0.0);
    let mut payment = level_payment(terms.principal, rate, terms.term_years)?;
    let mut outstanding = terms.principal;
    let mut rows = Vec::with_capacity(terms.term_years as usize);

    for year in 1..=terms.term_years {
        let interest = outstanding * rate;
        let mut principal = payment - interest;
        if principal > outstanding {
            principal = outstanding;
            payment = interest + principal;
        }
        outstanding -= principal;
        rows.push(ScheduleRow {
            year,
            payment,
            interest,
            principal,
            outstanding: outstanding.max(0.0),
        });
    }

    Ok(rows)
}
