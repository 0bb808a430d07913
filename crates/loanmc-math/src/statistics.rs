//! Descriptive statistics over simulated outcomes.
//!
//! All functions reject empty and non-finite samples. Quantiles use linear
//! interpolation between closest ranks:
//!
//! ```text
//! h = (n − 1) × q
//! Q(q) = x[⌊h⌋] + (h − ⌊h⌋) × (x[⌈h⌉] − x[⌊h⌋])
//! ```
//!
//! over the ascending order statistics `x`.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

fn check_sample(values: &[f64]) -> MathResult<()> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "sample contains non-finite value {bad}"
        )));
    }
    Ok(())
}

fn check_probability(q: f64) -> MathResult<()> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "quantile {q} outside [0, 1]"
        )))
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of an already sorted, non-empty sample.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    check_sample(values)?;
    Ok(values.iter().mean())
}

/// Population standard deviation (divisor `n`).
pub fn population_std_dev(values: &[f64]) -> MathResult<f64> {
    check_sample(values)?;
    Ok(values.iter().population_std_dev())
}

/// Median (the 0.5 quantile).
pub fn median(values: &[f64]) -> MathResult<f64> {
    quantile(values, 0.5)
}

/// Quantile `q` in `[0, 1]` with linear interpolation.
pub fn quantile(values: &[f64], q: f64) -> MathResult<f64> {
    check_sample(values)?;
    check_probability(q)?;
    Ok(quantile_sorted(&sorted_copy(values), q))
}

/// Percentile `p` in `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> MathResult<f64> {
    quantile(values, p / 100.0)
}

/// Distribution summary of a simulated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// 5th percentile.
    pub percentile_5: f64,
    /// 95th percentile.
    pub percentile_95: f64,
    /// Monte Carlo standard error of the mean (`std_dev / √n`).
    pub standard_error: f64,
}

impl SummaryStatistics {
    /// Summarizes a sample.
    pub fn from_values(values: &[f64]) -> MathResult<Self> {
        check_sample(values)?;
        let sorted = sorted_copy(values);
        let count = sorted.len();
        let std_dev = values.iter().population_std_dev();

        Ok(Self {
            count,
            mean: values.iter().mean(),
            median: quantile_sorted(&sorted, 0.5),
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            percentile_5: quantile_sorted(&sorted, 0.05),
            percentile_95: quantile_sorted(&sorted, 0.95),
            standard_error: std_dev / (count as f64).sqrt(),
        })
    }

    /// Width of the 5th–95th percentile band.
    #[must_use]
    pub fn interpercentile_range(&self) -> f64 {
        self.percentile_95 - self.percentile_5
    }
}

/// Tail-risk measures at a confidence level.
///
/// For confidence `c` the lower quantile sits at `1 − c` and the upper at `c`.
/// Value-at-risk is the distance from the mean down to the lower quantile;
/// expected shortfall is the mean of outcomes at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailMetrics {
    /// Confidence level, e.g. 0.95.
    pub confidence: f64,
    /// Downside quantile (`1 − confidence`).
    pub lower_quantile: f64,
    /// Upside quantile (`confidence`).
    pub upper_quantile: f64,
    /// Mean minus the downside quantile.
    pub value_at_risk: f64,
    /// Mean of outcomes at or below the downside quantile.
    pub expected_shortfall: f64,
}

impl TailMetrics {
    /// Computes tail metrics; `confidence` must lie strictly between 0 and 1.
    pub fn from_values(values: &[f64], confidence: f64) -> MathResult<Self> {
        check_sample(values)?;
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(MathError::invalid_input(format!(
                "confidence {confidence} must be strictly between 0 and 1"
            )));
        }

        let sorted = sorted_copy(values);
        let lower = quantile_sorted(&sorted, 1.0 - confidence);
        let upper = quantile_sorted(&sorted, confidence);
        let mean = values.iter().mean();

        let tail: Vec<f64> = sorted.iter().copied().take_while(|v| *v <= lower).collect();
        // sorted[0] <= lower always, so the tail is never empty
        let expected_shortfall = tail.iter().mean();

        Ok(Self {
            confidence,
            lower_quantile: lower,
            upper_quantile: upper,
            value_at_risk: mean - lower,
            expected_shortfall,
        })
    }
}
