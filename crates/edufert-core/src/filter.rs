//! Country/year selection over joined records

use crate::types::{CountryCode, JoinedRecord, Year};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::debug;

/// Country and year predicates
///
/// An empty set leaves its dimension unrestricted; it never means "select
/// nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    countries: BTreeSet<CountryCode>,
    years: BTreeSet<Year>,
}

impl Selection {
    /// No restriction on either dimension
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<C, Y>(countries: C, years: Y) -> Self
    where
        C: IntoIterator,
        C::Item: Into<CountryCode>,
        Y: IntoIterator<Item = Year>,
    {
        Self::all().with_countries(countries).with_years(years)
    }

    /// Add country codes to the selection
    pub fn with_countries<C>(mut self, countries: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<CountryCode>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    /// Add years to the selection
    pub fn with_years<Y: IntoIterator<Item = Year>>(mut self, years: Y) -> Self {
        self.years.extend(years);
        self
    }

    /// Add every year of an inclusive range
    pub fn with_year_range(self, range: RangeInclusive<Year>) -> Self {
        self.with_years(range)
    }

    pub fn countries(&self) -> &BTreeSet<CountryCode> {
        &self.countries
    }

    pub fn years(&self) -> &BTreeSet<Year> {
        &self.years
    }

    pub fn is_unrestricted(&self) -> bool {
        self.countries.is_empty() && self.years.is_empty()
    }

    /// Whether a record passes the country and year predicates
    pub fn matches(&self, record: &JoinedRecord) -> bool {
        (self.countries.is_empty() || self.countries.contains(&record.country_code))
            && (self.years.is_empty() || self.years.contains(&record.year))
    }
}

/// Joined records that passed a selection and carry both indicator values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredRecords {
    records: Vec<JoinedRecord>,
}

impl FilteredRecords {
    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JoinedRecord> {
        self.records.iter()
    }

    /// `(enrollment, fertility)` pairs in record order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.records.iter().filter_map(JoinedRecord::pair)
    }

    /// Enrollment and fertility columns as two equal-length vectors
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.pairs().unzip()
    }

    /// Distinct codes present, ascending
    pub fn codes(&self) -> BTreeSet<CountryCode> {
        self.records
            .iter()
            .map(|r| r.country_code.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a FilteredRecords {
    type Item = &'a JoinedRecord;
    type IntoIter = std::slice::Iter<'a, JoinedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Keep records matching `selection` whose two indicator values are present
///
/// The input is untouched; the result is a fresh set.
pub fn filter(records: &[JoinedRecord], selection: &Selection) -> FilteredRecords {
    let kept: Vec<JoinedRecord> = records
        .iter()
        .filter(|record| selection.matches(record) && record.is_complete())
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        kept = kept.len(),
        countries = selection.countries().len(),
        years = selection.years().len(),
        "filtered joined records"
    );

    FilteredRecords { records: kept }
}
