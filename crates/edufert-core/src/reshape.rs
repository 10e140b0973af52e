//! Wide and long table forms and the reshape between them

use crate::types::{CountryCode, LongRecord, Year};
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::trace;

/// One country row of a wide table
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub country_name: String,
    pub country_code: CountryCode,
    /// One cell per year column, in the table's column order
    pub values: Vec<Option<f64>>,
}

impl WideRow {
    pub fn new(
        country_name: impl Into<String>,
        country_code: impl Into<CountryCode>,
        values: Vec<Option<f64>>,
    ) -> Self {
        Self {
            country_name: country_name.into(),
            country_code: country_code.into(),
            values,
        }
    }
}

/// An indicator table with one row per country and one column per year
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    indicator: String,
    years: Vec<Year>,
    rows: Vec<WideRow>,
}

impl WideTable {
    /// Build a wide table, rejecting repeated years, repeated country codes
    /// and rows whose cell count does not match the year columns
    pub fn new(indicator: impl Into<String>, years: Vec<Year>, rows: Vec<WideRow>) -> Result<Self> {
        let indicator = indicator.into();

        let mut seen_years = HashSet::with_capacity(years.len());
        for &year in &years {
            if !seen_years.insert(year) {
                return Err(Error::malformed(format!(
                    "year column {year} appears more than once in {indicator}"
                )));
            }
        }

        let mut seen_codes = HashSet::with_capacity(rows.len());
        for row in &rows {
            if row.values.len() != years.len() {
                return Err(Error::malformed(format!(
                    "row {} in {indicator} has {} cells for {} year columns",
                    row.country_code,
                    row.values.len(),
                    years.len()
                )));
            }
            if !seen_codes.insert(&row.country_code) {
                return Err(Error::malformed(format!(
                    "country code {} appears more than once in {indicator}",
                    row.country_code
                )));
            }
        }

        Ok(Self {
            indicator,
            years,
            rows,
        })
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reshape into long form: one record per (country, year) cell, missing
    /// cells included
    pub fn melt(&self) -> LongTable {
        let mut records = Vec::with_capacity(self.rows.len() * self.years.len());
        for row in &self.rows {
            for (&year, &value) in self.years.iter().zip(&row.values) {
                records.push(LongRecord {
                    country_name: row.country_name.clone(),
                    country_code: row.country_code.clone(),
                    year,
                    value,
                });
            }
        }
        trace!(
            indicator = %self.indicator,
            rows = self.rows.len(),
            records = records.len(),
            "melted wide table"
        );
        // Keys are unique by construction of `WideTable`
        LongTable {
            indicator: self.indicator.clone(),
            records,
        }
    }

    /// Copy with ascending year columns and rows ordered by country code
    pub fn normalized(&self) -> WideTable {
        let mut order: Vec<usize> = (0..self.years.len()).collect();
        order.sort_by_key(|&i| self.years[i]);

        let years = order.iter().map(|&i| self.years[i]).collect();
        let mut rows: Vec<WideRow> = self
            .rows
            .iter()
            .map(|row| WideRow {
                country_name: row.country_name.clone(),
                country_code: row.country_code.clone(),
                values: order.iter().map(|&i| row.values[i]).collect(),
            })
            .collect();
        rows.sort_by(|a, b| a.country_code.cmp(&b.country_code));

        WideTable {
            indicator: self.indicator.clone(),
            years,
            rows,
        }
    }
}

/// An indicator table with one record per (country, year)
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    indicator: String,
    records: Vec<LongRecord>,
}

impl LongTable {
    /// Build a long table, rejecting repeated `(country code, year)` keys
    pub fn new(indicator: impl Into<String>, records: Vec<LongRecord>) -> Result<Self> {
        let indicator = indicator.into();
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert((&record.country_code, record.year)) {
                return Err(Error::duplicate_key(
                    &indicator,
                    &record.country_code,
                    record.year,
                ));
            }
        }
        Ok(Self { indicator, records })
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn records(&self) -> &[LongRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pivot back into wide form
    ///
    /// Years come out ascending and rows in order of first appearance. A
    /// country without a record for some year gets a missing cell there.
    pub fn to_wide(&self) -> Result<WideTable> {
        let years: Vec<Year> = self
            .records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column: BTreeMap<Year, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

        let mut position: BTreeMap<&CountryCode, usize> = BTreeMap::new();
        let mut rows: Vec<WideRow> = Vec::new();
        for record in &self.records {
            let index = *position.entry(&record.country_code).or_insert_with(|| {
                rows.push(WideRow {
                    country_name: record.country_name.clone(),
                    country_code: record.country_code.clone(),
                    values: vec![None; years.len()],
                });
                rows.len() - 1
            });
            rows[index].values[column[&record.year]] = record.value;
        }

        WideTable::new(self.indicator.clone(), years, rows)
    }
}
