//! The joined dataset, computed once per load and read-only afterwards

use crate::filter::{filter, FilteredRecords, Selection};
use crate::types::{CountryCode, CountryLabels, JoinedRecord, Year};
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// All `(country code, year)` pairs present in both source tables
///
/// Records are ordered by `(country code, year)` and every record of a code
/// shares one [`CountryLabels`] allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedDataset {
    records: Vec<JoinedRecord>,
    countries: BTreeMap<CountryCode, Arc<CountryLabels>>,
    years: BTreeSet<Year>,
}

impl JoinedDataset {
    /// Build a dataset from arbitrary records
    ///
    /// Records are sorted by key. Repeated keys, and a code whose records
    /// disagree on its labels, are malformed input.
    pub fn new(mut records: Vec<JoinedRecord>) -> Result<Self> {
        records.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut countries: BTreeMap<CountryCode, Arc<CountryLabels>> = BTreeMap::new();
        let mut years = BTreeSet::new();
        let mut previous: Option<(CountryCode, Year)> = None;

        for record in &mut records {
            if let Some((code, year)) = &previous {
                if *code == record.country_code && *year == record.year {
                    return Err(Error::duplicate_key(
                        "joined dataset",
                        &record.country_code,
                        record.year,
                    ));
                }
            }
            previous = Some((record.country_code.clone(), record.year));

            match countries.get(&record.country_code) {
                Some(labels) if **labels != *record.labels => {
                    return Err(Error::malformed(format!(
                        "country {} has inconsistent names: {:?} vs {:?}",
                        record.country_code, labels, record.labels
                    )));
                }
                Some(labels) => record.labels = Arc::clone(labels),
                None => {
                    countries.insert(record.country_code.clone(), Arc::clone(&record.labels));
                }
            }
            years.insert(record.year);
        }

        Ok(Self {
            records,
            countries,
            years,
        })
    }

    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.years.iter().copied()
    }

    /// Distinct country codes, ascending
    pub fn codes(&self) -> impl Iterator<Item = &CountryCode> {
        self.countries.keys()
    }

    pub fn labels(&self, code: &str) -> Option<&CountryLabels> {
        self.countries.get(code).map(|labels| labels.as_ref())
    }

    /// `(fertility-table name, code)` pairs sorted by name
    pub fn country_directory(&self) -> Vec<(&str, &CountryCode)> {
        let mut directory: Vec<(&str, &CountryCode)> = self
            .countries
            .iter()
            .map(|(code, labels)| (labels.fertility.as_str(), code))
            .collect();
        directory.sort();
        directory
    }

    /// Resolve a display name to its code
    ///
    /// The fertility-table spelling is matched first, then the enrollment one.
    pub fn code_for_name(&self, name: &str) -> Option<&CountryCode> {
        self.countries
            .iter()
            .find(|(_, labels)| labels.fertility == name)
            .or_else(|| {
                self.countries
                    .iter()
                    .find(|(_, labels)| labels.enrollment == name)
            })
            .map(|(code, _)| code)
    }

    /// Apply a selection to the full record set
    pub fn filter(&self, selection: &Selection) -> FilteredRecords {
        filter(&self.records, selection)
    }
}
