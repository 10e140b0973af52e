//! The statistics summary of a filtered record set

use crate::correlation::{Correlation, CorrelationEstimator, Pearson, Spearman};
use crate::moments::PairedMoments;
use crate::regression::{LinearFit, OrdinaryLeastSquares};
use edufert_core::{Error, FilteredRecords, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Association between enrollment (x) and fertility (y) for one record set
///
/// Only meaningful for the set it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Number of paired observations
    pub n: usize,
    pub pearson: Correlation,
    pub spearman: Correlation,
    /// Fertility rate regressed on enrollment rate
    pub regression: LinearFit,
}

impl StatisticsSummary {
    pub fn r_squared(&self) -> f64 {
        self.regression.r_squared
    }
}

impl fmt::Display for StatisticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pearson correlation:  {}", self.pearson)?;
        writeln!(f, "Spearman correlation: {}", self.spearman)?;
        write!(
            f,
            "Regression: TFR = {:.3} × enrollment + {:.3} (R² = {:.3})",
            self.regression.slope, self.regression.intercept, self.regression.r_squared
        )
    }
}

/// Summarize a filtered record set
///
/// An empty set is an insufficient-data error; callers should check
/// [`FilteredRecords::is_empty`] first and show a "no data" state.
#[instrument(skip(records), fields(n = records.len()))]
pub fn summarize(records: &FilteredRecords) -> Result<StatisticsSummary> {
    let (enrollment, fertility) = records.columns();
    summarize_pairs(&enrollment, &fertility)
}

/// Summarize paired enrollment and fertility values
pub fn summarize_pairs(enrollment: &[f64], fertility: &[f64]) -> Result<StatisticsSummary> {
    if enrollment.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: enrollment.len(),
        });
    }
    let moments = PairedMoments::compute(enrollment, fertility)?;
    moments.require_spread_x("enrollment rate")?;
    moments.require_spread_y("fertility rate")?;

    let pearson = Pearson::new().correlate(enrollment, fertility)?;
    let spearman = Spearman::new().correlate(enrollment, fertility)?;
    let mut regression = OrdinaryLeastSquares::new().fit(enrollment, fertility)?;
    // R² is the square of the reported Pearson r
    regression.r_value = pearson.coefficient;
    regression.r_squared = pearson.coefficient * pearson.coefficient;

    debug!(
        n = moments.n,
        pearson = pearson.coefficient,
        spearman = spearman.coefficient,
        slope = regression.slope,
        "computed statistics summary"
    );

    Ok(StatisticsSummary {
        n: moments.n,
        pearson,
        spearman,
        regression,
    })
}
