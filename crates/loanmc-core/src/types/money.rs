//! Currency amounts for reporting.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};

/// A dollar amount rounded to cents.
///
/// Simulation runs in `f64`; values are converted to `Money` only at the
/// reporting boundary so that printed figures round consistently.
///
/// ```rust
/// use loanmc_core::Money;
///
/// let m = Money::from_f64(505_735.9412).unwrap();
/// assert_eq!(m.to_string(), "$505,735.94");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates an amount from a decimal, rounding to cents.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Creates an amount from a float, rounding to cents.
    pub fn from_f64(amount: f64) -> LoanResult<Self> {
        if !amount.is_finite() {
            return Err(LoanError::InvalidAmount {
                value: amount.to_string(),
            });
        }
        Decimal::from_f64_retain(amount)
            .map(Self::new)
            .ok_or_else(|| LoanError::InvalidAmount {
                value: amount.to_string(),
            })
    }

    /// The underlying decimal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount as a float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0.is_sign_negative() && !self.0.is_zero();
        let digits = format!("{:.2}", self.0.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if negative {
            write!(f, "-${grouped}.{cents}")
        } else {
            write!(f, "${grouped}.{cents}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::new(dec!(505735.94)).to_string(), "$505,735.94");
        assert_eq!(Money::new(dec!(21997.15)).to_string(), "$21,997.15");
        assert_eq!(Money::new(dec!(1234567.5)).to_string(), "$1,234,567.50");
        assert_eq!(Money::new(dec!(999.999)).to_string(), "$1,000.00");
        assert_eq!(Money::new(dec!(12)).to_string(), "$12.00");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Money::new(dec!(-4512.3)).to_string(), "-$4,512.30");
    }

    #[test]
    fn test_from_f64_rounds_to_cents() {
        let m = Money::from_f64(466_695.0349).unwrap();
        assert_eq!(m.amount(), dec!(466695.03));
        assert!((m.as_f64() - 466_695.03).abs() < 1e-9);
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_err());
        assert!(Money::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::new(dec!(10.5))).unwrap();
        assert_eq!(json, "10.5");
    }
}
