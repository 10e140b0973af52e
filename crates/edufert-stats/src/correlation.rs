//! Correlation estimators

use crate::moments::PairedMoments;
use crate::ranks::average_ranks;
use crate::significance::correlation_p_value;
use edufert_core::Result;
use serde::Serialize;
use std::fmt;

/// A correlation coefficient with its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    /// Coefficient in [-1, 1]
    pub coefficient: f64,
    /// Two-sided p-value for zero correlation
    pub p_value: f64,
    /// Number of pairs
    pub n: usize,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} (p={:.3e})", self.coefficient, self.p_value)
    }
}

/// Measures of association between two paired samples
pub trait CorrelationEstimator {
    /// Name of the coefficient
    fn name(&self) -> &'static str;

    /// Correlate `x` with `y`
    ///
    /// Fails with an insufficient-data error for fewer than two pairs or a
    /// sample without spread.
    fn correlate(&self, x: &[f64], y: &[f64]) -> Result<Correlation>;
}

/// Pearson product-moment correlation
#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl Pearson {
    pub fn new() -> Self {
        Self
    }
}

impl CorrelationEstimator for Pearson {
    fn name(&self) -> &'static str {
        "Pearson"
    }

    fn correlate(&self, x: &[f64], y: &[f64]) -> Result<Correlation> {
        let moments = PairedMoments::compute(x, y)?;
        moments.require_spread_x("x")?;
        moments.require_spread_y("y")?;

        let coefficient = moments.correlation();
        Ok(Correlation {
            coefficient,
            p_value: correlation_p_value(coefficient, moments.n)?,
            n: moments.n,
        })
    }
}

/// Spearman rank correlation
///
/// Pearson correlation of the average ranks, so ties are handled the usual
/// way. The p-value uses the same t approximation as [`Pearson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Spearman;

impl Spearman {
    pub fn new() -> Self {
        Self
    }
}

impl CorrelationEstimator for Spearman {
    fn name(&self) -> &'static str {
        "Spearman"
    }

    fn correlate(&self, x: &[f64], y: &[f64]) -> Result<Correlation> {
        // Validate on the raw values so errors name the real problem
        let raw = PairedMoments::compute(x, y)?;
        raw.require_spread_x("x")?;
        raw.require_spread_y("y")?;

        let moments = PairedMoments::compute(&average_ranks(x), &average_ranks(y))?;
        let coefficient = moments.correlation();
        Ok(Correlation {
            coefficient,
            p_value: correlation_p_value(coefficient, moments.n)?,
            n: moments.n,
        })
    }
}
