//! Matrix, time-series and per-year distribution views of a filtered set

use crate::filter::FilteredRecords;
use crate::types::{CountryCode, Measure, Year};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One labelled row of a [`PivotTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    /// Country name from the enrollment table
    pub label: String,
    /// One cell per year column; `None` where the country has no data
    pub cells: Vec<Option<f64>>,
}

/// Mean of a measure per (country name, year)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    measure: Measure,
    years: Vec<Year>,
    rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row label and year
    pub fn get(&self, label: &str, year: Year) -> Option<f64> {
        let column = self.years.binary_search(&year).ok()?;
        self.rows
            .iter()
            .find(|row| row.label == label)
            .and_then(|row| row.cells[column])
    }
}

/// Group by (enrollment-table country name, year) and average `measure`
///
/// Rows are ordered by label and columns by year.
pub fn pivot(records: &FilteredRecords, measure: Measure) -> PivotTable {
    let mut groups: BTreeMap<&str, BTreeMap<Year, (f64, usize)>> = BTreeMap::new();
    let mut years = BTreeSet::new();

    for record in records {
        let Some(value) = record.value(measure) else {
            continue;
        };
        let cell = groups
            .entry(record.labels.enrollment.as_str())
            .or_default()
            .entry(record.year)
            .or_insert((0.0, 0));
        cell.0 += value;
        cell.1 += 1;
        years.insert(record.year);
    }

    let years: Vec<Year> = years.into_iter().collect();
    let rows = groups
        .into_iter()
        .map(|(label, cells)| PivotRow {
            label: label.to_string(),
            cells: years
                .iter()
                .map(|year| cells.get(year).map(|&(sum, n)| sum / n as f64))
                .collect(),
        })
        .collect();

    PivotTable {
        measure,
        years,
        rows,
    }
}

/// Year-ordered indicator values of one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country_code: CountryCode,
    /// Country name from the fertility table
    pub label: String,
    pub fertility: Vec<(Year, f64)>,
    pub enrollment: Vec<(Year, f64)>,
}

/// Extract the series of one country, or `None` if it has no records
pub fn series(records: &FilteredRecords, code: &CountryCode) -> Option<CountrySeries> {
    let mut rows: Vec<_> = records
        .iter()
        .filter(|r| &r.country_code == code)
        .collect();
    let label = rows.first()?.labels.fertility.clone();
    rows.sort_by_key(|r| r.year);

    let mut fertility = Vec::with_capacity(rows.len());
    let mut enrollment = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(value) = row.fertility_rate {
            fertility.push((row.year, value));
        }
        if let Some(value) = row.enrollment_rate {
            enrollment.push((row.year, value));
        }
    }

    Some(CountrySeries {
        country_code: code.clone(),
        label,
        fertility,
        enrollment,
    })
}

/// One series per distinct code, ordered by code
pub fn series_for_all(records: &FilteredRecords) -> Vec<CountrySeries> {
    records
        .codes()
        .iter()
        .filter_map(|code| series(records, code))
        .collect()
}

/// Five-number summary of one measure within one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearDistribution {
    pub year: Year,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Linear-interpolation quantile of sorted, non-empty data
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Distribution of `measure` per year, ordered by year
pub fn year_distribution(records: &FilteredRecords, measure: Measure) -> Vec<YearDistribution> {
    let mut by_year: BTreeMap<Year, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(value) = record.value(measure) {
            by_year.entry(record.year).or_default().push(value);
        }
    }

    by_year
        .into_iter()
        .map(|(year, mut values)| {
            values.sort_by(|a, b| a.total_cmp(b));
            YearDistribution {
                year,
                count: values.len(),
                min: values[0],
                q1: quantile_sorted(&values, 0.25),
                median: quantile_sorted(&values, 0.5),
                q3: quantile_sorted(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}
