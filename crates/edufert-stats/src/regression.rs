//! Simple linear regression

use crate::moments::PairedMoments;
use crate::significance::correlation_p_value;
use edufert_core::Result;
use serde::Serialize;
use std::fmt;

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation of the fitted pairs
    pub r_value: f64,
    /// Coefficient of determination, `r_value²`
    pub r_squared: f64,
    /// Two-sided p-value for a zero slope
    pub p_value: f64,
    pub slope_std_err: f64,
    pub intercept_std_err: f64,
    pub n: usize,
}

impl LinearFit {
    /// Fitted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y = {:.3} × x + {:.3} (R² = {:.3})",
            self.slope, self.intercept, self.r_squared
        )
    }
}

/// Ordinary least squares of `y` on `x`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinaryLeastSquares;

impl OrdinaryLeastSquares {
    pub fn new() -> Self {
        Self
    }

    /// Fit `y` on `x`
    ///
    /// `x` needs at least two distinct values. A constant `y` fits a flat
    /// line with `r_value = 0`.
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<LinearFit> {
        let m = PairedMoments::compute(x, y)?;
        m.require_spread_x("x")?;

        let slope = m.sxy / m.sxx;
        let intercept = m.mean_y - slope * m.mean_x;
        let r_value = if m.y_is_constant() { 0.0 } else { m.correlation() };
        let r_squared = r_value * r_value;

        let df = m.n - 2;
        let (slope_std_err, intercept_std_err) = if df == 0 {
            (0.0, 0.0)
        } else {
            let n = m.n as f64;
            let residual = ((1.0 - r_squared).max(0.0) * m.syy / m.sxx / df as f64).sqrt();
            let spread = (m.sxx / n + m.mean_x * m.mean_x).sqrt();
            (residual, residual * spread)
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_value,
            r_squared,
            p_value: correlation_p_value(r_value, m.n)?,
            slope_std_err,
            intercept_std_err,
            n: m.n,
        })
    }
}
