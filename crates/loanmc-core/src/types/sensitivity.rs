//! Borrower sensitivity to interest-rate shocks.

use serde::{Deserialize, Serialize};

/// Linear response of default and prepayment propensities to a rate shock.
///
/// Higher rates push defaults up and prepayments down:
///
/// ```text
/// p_default' = clamp(p_default + shock × default_beta, 0, 1)
/// p_prepay'  = clamp(p_prepay  − shock × prepay_beta,  0, 1)
/// ```
///
/// Simulation draws compare against [`event_thresholds`](Self::event_thresholds),
/// whose default threshold is not floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSensitivity {
    /// Change in annual default probability per unit of rate shock.
    #[serde(default = "default_default_beta")]
    pub default_beta: f64,

    /// Reduction in annual prepayment probability per unit of rate shock.
    #[serde(default = "default_prepay_beta")]
    pub prepay_beta: f64,
}

fn default_default_beta() -> f64 {
    0.5
}

fn default_prepay_beta() -> f64 {
    0.3
}

impl Default for RateSensitivity {
    fn default() -> Self {
        Self {
            default_beta: default_default_beta(),
            prepay_beta: default_prepay_beta(),
        }
    }
}

impl RateSensitivity {
    /// Creates a sensitivity with explicit betas.
    #[must_use]
    pub fn new(default_beta: f64, prepay_beta: f64) -> Self {
        Self {
            default_beta,
            prepay_beta,
        }
    }

    /// Borrower behaviour unaffected by rates.
    #[must_use]
    pub fn insensitive() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Default probability after a rate shock.
    #[must_use]
    pub fn shocked_default(&self, base: f64, shock: f64) -> f64 {
        (base + shock * self.default_beta).clamp(0.0, 1.0)
    }

    /// Prepayment probability after a rate shock.
    #[must_use]
    pub fn shocked_prepay(&self, base: f64, shock: f64) -> f64 {
        (base - shock * self.prepay_beta).clamp(0.0, 1.0)
    }

    /// Cumulative thresholds `(default, default + prepay)` for one uniform draw.
    ///
    /// The default threshold is capped at one but may go negative when rates
    /// fall far enough; a negative threshold removes defaults and narrows the
    /// prepayment band by the same amount.
    #[must_use]
    pub fn event_thresholds(&self, default_base: f64, prepay_base: f64, shock: f64) -> (f64, f64) {
        let default = (default_base + shock * self.default_beta).min(1.0);
        (default, default + self.shocked_prepay(prepay_base, shock))
    }
}
