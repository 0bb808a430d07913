//! Interest-rate shock model.

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::error::{SimError, SimResult};

/// Parallel rate shock drawn once per simulated path.
///
/// ```text
/// shock = shift + N(0, volatility²)
/// ```
///
/// A volatility of zero makes the shock the deterministic `shift`.
#[derive(Debug, Clone)]
pub struct RateShockModel {
    volatility: f64,
    shift: f64,
    normal: Option<Normal>,
}

impl RateShockModel {
    /// Creates a shock model.
    pub fn new(volatility: f64, shift: f64) -> SimResult<Self> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(SimError::invalid_input(format!(
                "rate shock volatility must be non-negative, got {volatility}"
            )));
        }
        if !shift.is_finite() {
            return Err(SimError::invalid_input("rate shift must be finite"));
        }

        let normal = if volatility > 0.0 {
            Some(Normal::new(0.0, volatility).map_err(|e| SimError::distribution(e.to_string()))?)
        } else {
            None
        };

        Ok(Self {
            volatility,
            shift,
            normal,
        })
    }

    /// Standard deviation of the random component.
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Deterministic component.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Draws one shock.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.normal {
            Some(normal) => self.shift + normal.sample(rng),
            None => self.shift,
        }
    }
}

/// Discount rate after a shock, floored at zero.
#[must_use]
pub fn shocked_discount_rate(base: f64, shock: f64) -> f64 {
    (base + shock).max(0.0)
}
