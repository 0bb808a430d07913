//! Equal-width histograms of simulated distributions.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// One histogram bin covering `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (inclusive only for the last bin).
    pub upper: f64,
    /// Number of observations in the bin.
    pub count: usize,
}

impl Bin {
    /// Bin centre.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// Histogram with equal-width bins spanning the sample range.
///
/// # Example
///
/// ```rust
/// use loanmc_math::histogram::Histogram;
///
/// let h = Histogram::new(&[1.0, 2.0, 2.5, 4.0], 3).unwrap();
/// assert_eq!(h.bins().len(), 3);
/// assert_eq!(h.total(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width buckets between their min and max.
    ///
    /// A sample whose values are all equal yields a single zero-width bin.
    pub fn new(values: &[f64], bins: usize) -> MathResult<Self> {
        if bins == 0 {
            return Err(MathError::invalid_input("histogram needs at least one bin"));
        }
        if values.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("histogram sample contains non-finite values"));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if max <= min {
            return Ok(Self {
                bins: vec![Bin {
                    lower: min,
                    upper: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: min + i as f64 * width,
                upper: if i == bins - 1 {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect();

        Ok(Self { bins })
    }

    /// The bins, lowest first.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Total number of binned observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
