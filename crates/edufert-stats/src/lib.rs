//! Association statistics between enrollment and fertility
//!
//! This crate computes the statistics summary shown next to every chart:
//!
//! - **Pearson** linear correlation with a two-sided p-value
//! - **Spearman** rank correlation with a two-sided p-value
//! - **Ordinary least squares** fit of fertility on enrollment
//!
//! All entry points refuse degenerate input with an insufficient-data error
//! instead of returning NaN.
//!
//! # Example
//!
//! ```rust
//! use edufert_stats::{summarize_pairs, CorrelationEstimator, Spearman};
//!
//! let enrollment = [20.0, 45.0, 70.0, 90.0];
//! let fertility = [6.5, 4.1, 2.4, 1.6];
//!
//! let summary = summarize_pairs(&enrollment, &fertility).unwrap();
//! assert!(summary.pearson.coefficient < -0.9);
//! assert!(summary.regression.slope < 0.0);
//!
//! let rho = Spearman::new().correlate(&enrollment, &fertility).unwrap();
//! assert_eq!(rho.coefficient, -1.0);
//! ```

mod correlation;
mod moments;
mod ranks;
mod regression;
mod significance;
mod summary;

pub use correlation::{Correlation, CorrelationEstimator, Pearson, Spearman};
pub use ranks::average_ranks;
pub use regression::{LinearFit, OrdinaryLeastSquares};
pub use significance::correlation_p_value;
pub use summary::{summarize, summarize_pairs, StatisticsSummary};

// Convenience constructors
pub fn pearson() -> Pearson {
    Pearson::new()
}

pub fn spearman() -> Spearman {
    Spearman::new()
}

pub fn ols() -> OrdinaryLeastSquares {
    OrdinaryLeastSquares::new()
}
