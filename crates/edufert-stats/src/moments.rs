//! Centered second moments of paired samples

use edufert_core::{Error, Result};

/// Sums of centered squares and cross-products of `(x, y)`
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairedMoments {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
    x_constant: bool,
    y_constant: bool,
}

impl PairedMoments {
    /// Validate and accumulate
    ///
    /// Requires equal lengths, at least two pairs, and finite values.
    pub fn compute(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "paired samples"));
        }
        if x.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: x.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("x"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("y"));
        }

        let n = x.len();
        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;

        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        Ok(Self {
            n,
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
            x_constant: x.iter().all(|&v| v == x[0]),
            y_constant: y.iter().all(|&v| v == y[0]),
        })
    }

    /// Fail unless `x` takes at least two distinct values
    pub fn require_spread_x(&self, name: &'static str) -> Result<()> {
        if self.x_constant || self.sxx <= 0.0 {
            return Err(Error::DegenerateVariance { variable: name });
        }
        Ok(())
    }

    /// Fail unless `y` takes at least two distinct values
    pub fn require_spread_y(&self, name: &'static str) -> Result<()> {
        if self.y_constant || self.syy <= 0.0 {
            return Err(Error::DegenerateVariance { variable: name });
        }
        Ok(())
    }

    pub fn y_is_constant(&self) -> bool {
        self.y_constant || self.syy <= 0.0
    }

    /// Product-moment correlation, clamped to [-1, 1]
    ///
    /// Both spreads must have been checked.
    pub fn correlation(&self) -> f64 {
        (self.sxy / (self.sxx * self.syy).sqrt()).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_moments() {
        let m = PairedMoments::compute(&[1.0, 2.0, 3.0], &[2.0, 4.0, 9.0]).unwrap();
        assert_eq!(m.n, 3);
        assert_abs_diff_eq!(m.mean_x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.mean_y, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.sxx, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.syy, 26.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.sxy, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_short_and_mismatched() {
        assert!(PairedMoments::compute(&[1.0], &[1.0])
            .unwrap_err()
            .is_insufficient_data());
        assert!(PairedMoments::compute(&[], &[])
            .unwrap_err()
            .is_insufficient_data());
        assert!(matches!(
            PairedMoments::compute(&[1.0, 2.0], &[1.0]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = PairedMoments::compute(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
        let err = PairedMoments::compute(&[1.0, 2.0], &[f64::INFINITY, 2.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_constant_detection() {
        // 0.1 repeated: the mean may not be exact, the spread check must still trip
        let m = PairedMoments::compute(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]).unwrap();
        assert!(m.require_spread_x("x").unwrap_err().is_insufficient_data());
        assert!(m.require_spread_y("y").is_ok());
        assert!(!m.y_is_constant());
    }
}
