//! Record sets and aggregates as DataFrames

use crate::Result;
use edufert_core::{columns, JoinedRecord, PivotTable, YearDistribution};
use polars::prelude::*;

/// One row per record, with the export column names
pub fn records_to_frame(records: &[JoinedRecord]) -> Result<DataFrame> {
    let edu_names: Vec<&str> = records.iter().map(|r| r.labels.enrollment.as_str()).collect();
    let codes: Vec<&str> = records.iter().map(|r| r.country_code.as_str()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let enrollment: Vec<Option<f64>> = records.iter().map(|r| r.enrollment_rate).collect();
    let fert_names: Vec<&str> = records.iter().map(|r| r.labels.fertility.as_str()).collect();
    let fertility: Vec<Option<f64>> = records.iter().map(|r| r.fertility_rate).collect();

    Ok(DataFrame::new(vec![
        Series::new(columns::COUNTRY_NAME_EDU.into(), edu_names).into(),
        Series::new(columns::COUNTRY_CODE.into(), codes).into(),
        Series::new(columns::YEAR.into(), years).into(),
        Series::new(columns::ENROLLMENT_RATE.into(), enrollment).into(),
        Series::new(columns::COUNTRY_NAME_FERT.into(), fert_names).into(),
        Series::new(columns::FERTILITY_RATE.into(), fertility).into(),
    ])?)
}

/// `Country Name` followed by one column per year, named by the year
pub fn pivot_to_frame(table: &PivotTable) -> Result<DataFrame> {
    let labels: Vec<&str> = table.rows().iter().map(|row| row.label.as_str()).collect();
    let mut frame: Vec<Column> = Vec::with_capacity(table.years().len() + 1);
    frame.push(Series::new(columns::COUNTRY_NAME.into(), labels).into());

    for (i, year) in table.years().iter().enumerate() {
        let cells: Vec<Option<f64>> = table.rows().iter().map(|row| row.cells[i]).collect();
        frame.push(Series::new(year.to_string().as_str().into(), cells).into());
    }
    Ok(DataFrame::new(frame)?)
}

/// One row per year with the five-number summary
pub fn distribution_to_frame(distribution: &[YearDistribution]) -> Result<DataFrame> {
    let pick = |f: fn(&YearDistribution) -> f64| distribution.iter().map(f).collect::<Vec<f64>>();
    let years: Vec<i32> = distribution.iter().map(|d| d.year).collect();
    let counts: Vec<u32> = distribution.iter().map(|d| d.count as u32).collect();

    Ok(DataFrame::new(vec![
        Series::new(columns::YEAR.into(), years).into(),
        Series::new("count".into(), counts).into(),
        Series::new("min".into(), pick(|d| d.min)).into(),
        Series::new("q1".into(), pick(|d| d.q1)).into(),
        Series::new("median".into(), pick(|d| d.median)).into(),
        Series::new("q3".into(), pick(|d| d.q3)).into(),
        Series::new("max".into(), pick(|d| d.max)).into(),
    ])?)
}
