//! Significance of a sample correlation coefficient

use edufert_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided p-value for `H0: rho = 0` given coefficient `r` over `n` pairs
///
/// Uses `t = r * sqrt((n - 2) / (1 - r^2))` against Student's t with `n - 2`
/// degrees of freedom. Two pairs carry no evidence and give 1.0; a perfect
/// correlation over more than two pairs gives 0.0.
pub fn correlation_p_value(r: f64, n: usize) -> Result<f64> {
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if !r.is_finite() || r.abs() > 1.0 {
        return Err(Error::InvalidParameter(format!(
            "correlation coefficient {r} must be in [-1, 1]"
        )));
    }

    let df = (n - 2) as f64;
    if n == 2 || r == 0.0 {
        return Ok(1.0);
    }
    if r.abs() == 1.0 {
        return Ok(0.0);
    }

    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        Error::Computation(format!("Failed to create t-distribution: {}", e))
    })?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    Ok(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_correlation_is_not_significant() {
        assert_abs_diff_eq!(correlation_p_value(0.0, 10).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_value() {
        // r = 0.5, n = 10: t = 1.633 on 8 degrees of freedom, two-sided p = 0.141
        let p = correlation_p_value(0.5, 10).unwrap();
        assert_abs_diff_eq!(p, 0.141, epsilon = 1e-3);
    }

    #[test]
    fn test_sign_does_not_matter() {
        let pos = correlation_p_value(0.7, 12).unwrap();
        let neg = correlation_p_value(-0.7, 12).unwrap();
        assert_abs_diff_eq!(pos, neg, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(correlation_p_value(-1.0, 2).unwrap(), 1.0);
        assert_eq!(correlation_p_value(1.0, 5).unwrap(), 0.0);
        assert!(correlation_p_value(0.3, 1).unwrap_err().is_insufficient_data());
        assert!(correlation_p_value(1.5, 10).is_err());
        assert!(correlation_p_value(f64::NAN, 10).is_err());
    }
}
