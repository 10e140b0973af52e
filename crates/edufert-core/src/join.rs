//! Inner join of the enrollment and fertility long tables

use crate::dataset::JoinedDataset;
use crate::reshape::LongTable;
use crate::types::{CountryCode, CountryLabels, JoinedRecord, LongRecord, Year};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Index a long table by `(code, year)`, rejecting repeated keys
fn index_by_key(table: &LongTable) -> Result<BTreeMap<(&CountryCode, Year), &LongRecord>> {
    let mut index = BTreeMap::new();
    for record in table.records() {
        if index
            .insert((&record.country_code, record.year), record)
            .is_some()
        {
            return Err(Error::duplicate_key(
                table.indicator(),
                &record.country_code,
                record.year,
            ));
        }
    }
    Ok(index)
}

/// Pair enrollment and fertility records sharing `(country code, year)`
///
/// Keys present in only one table are dropped. The output is ordered by
/// `(code, year)`. Each code's labels come from its rows in the two tables.
#[instrument(skip_all, fields(enrollment = enrollment.indicator(), fertility = fertility.indicator()))]
pub fn inner_join(enrollment: &LongTable, fertility: &LongTable) -> Result<JoinedDataset> {
    let left = index_by_key(enrollment)?;
    let right = index_by_key(fertility)?;

    let mut labels: HashMap<&CountryCode, Arc<CountryLabels>> = HashMap::new();
    let mut records = Vec::with_capacity(left.len().min(right.len()));

    for (key, edu) in &left {
        let Some(fert) = right.get(key) else {
            continue;
        };
        let shared = labels
            .entry(key.0)
            .or_insert_with(|| {
                Arc::new(CountryLabels::new(
                    edu.country_name.clone(),
                    fert.country_name.clone(),
                ))
            })
            .clone();

        records.push(JoinedRecord {
            country_code: key.0.clone(),
            year: key.1,
            labels: shared,
            enrollment_rate: edu.value,
            fertility_rate: fert.value,
        });
    }

    debug!(
        enrollment_records = left.len(),
        fertility_records = right.len(),
        joined = records.len(),
        "joined indicator tables"
    );

    JoinedDataset::new(records)
}
