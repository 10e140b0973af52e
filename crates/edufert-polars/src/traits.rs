//! Statistics over DataFrame columns

use crate::{Error, Result};
use edufert_stats::{summarize_pairs, Correlation, CorrelationEstimator, StatisticsSummary};
use polars::prelude::*;

/// Extension trait running the statistics engine on two numeric columns
pub trait IndicatorStatsExt {
    /// Rows where both columns hold a finite value, as `(x, y)` vectors
    ///
    /// Nulls and NaN are treated as missing.
    fn complete_pairs(&self, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)>;

    /// Full statistics summary of `y` against `x`
    fn indicator_summary(&self, x: &str, y: &str) -> Result<StatisticsSummary> {
        let (x, y) = self.complete_pairs(x, y)?;
        Ok(summarize_pairs(&x, &y)?)
    }

    /// One correlation coefficient of `y` against `x`
    fn indicator_correlation<E: CorrelationEstimator>(
        &self,
        x: &str,
        y: &str,
        estimator: &E,
    ) -> Result<Correlation> {
        let (x, y) = self.complete_pairs(x, y)?;
        Ok(estimator.correlate(&x, &y)?)
    }
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;

    let column = match column.dtype() {
        DataType::Float64 => column.clone(),
        DataType::Float32
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt32
        | DataType::UInt64 => column.cast(&DataType::Float64)?,
        dt => {
            return Err(Error::TypeMismatch {
                expected: "numeric".to_string(),
                got: format!("{:?}", dt),
            });
        }
    };

    Ok(column.f64()?.into_iter().collect())
}

impl IndicatorStatsExt for DataFrame {
    fn complete_pairs(&self, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = float_values(self, x)?;
        let ys = float_values(self, y)?;

        Ok(xs
            .into_iter()
            .zip(ys)
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((a, b)),
                _ => None,
            })
            .unzip())
    }
}
