//! Algebraic properties of reshape, join and filter

mod common;

use common::{chinaland_enrollment, chinaland_fertility, wide_table};
use edufert_core::{columns, filter, inner_join, CountryCode, JoinedRecord, Selection, Year};
use proptest::prelude::*;

type Flat = (String, Year, String, String, Option<f64>, Option<f64>);

fn flatten(record: &JoinedRecord) -> Flat {
    (
        record.country_code.to_string(),
        record.year,
        record.labels.enrollment.clone(),
        record.labels.fertility.clone(),
        record.enrollment_rate,
        record.fertility_rate,
    )
}

fn flatten_swapped(record: &JoinedRecord) -> Flat {
    (
        record.country_code.to_string(),
        record.year,
        record.labels.fertility.clone(),
        record.labels.enrollment.clone(),
        record.fertility_rate,
        record.enrollment_rate,
    )
}

#[test]
fn test_chinaland_scenario() {
    let dataset = inner_join(&chinaland_enrollment().melt(), &chinaland_fertility().melt()).unwrap();
    let rows: Vec<_> = dataset
        .records()
        .iter()
        .map(|r| (r.country_code.as_str(), r.year, r.enrollment_rate, r.fertility_rate))
        .collect();
    assert_eq!(
        rows,
        vec![("CHN", 2015, Some(90.1), Some(1.6)), ("CHN", 2016, Some(91.0), Some(1.5))]
    );

    let filtered = filter(dataset.records(), &Selection::all());
    assert_eq!(filtered.records(), dataset.records());
}

#[test]
fn test_year_only_in_one_table_is_excluded() {
    let enrollment = edufert_core::WideTable::new(
        columns::ENROLLMENT_RATE,
        vec![2019, 2020],
        vec![edufert_core::WideRow::new("Chinaland", "CHN", vec![Some(88.0), Some(92.0)])],
    )
    .unwrap();
    let fertility = edufert_core::WideTable::new(
        columns::FERTILITY_RATE,
        vec![2019],
        vec![edufert_core::WideRow::new("Chinaland", "CHN", vec![Some(1.7)])],
    )
    .unwrap();

    let dataset = inner_join(&enrollment.melt(), &fertility.melt()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert!(dataset.records().iter().all(|r| r.year != 2020));
    assert!(!dataset.years().any(|y| y == 2020));
}

#[test]
fn test_absent_code_filters_to_empty() {
    let dataset = inner_join(&chinaland_enrollment().melt(), &chinaland_fertility().melt()).unwrap();
    let filtered = dataset.filter(&Selection::all().with_countries([CountryCode::new("XXX")]));
    assert!(filtered.is_empty());
}

proptest! {
    #[test]
    fn prop_reshape_round_trip(table in wide_table("TFR")) {
        let back = table.melt().to_wide().unwrap();
        // Countries with rows survive; the round trip works modulo ordering
        prop_assert_eq!(back.normalized(), table.normalized());
    }

    #[test]
    fn prop_join_commutes(
        a in wide_table(columns::ENROLLMENT_RATE),
        b in wide_table(columns::FERTILITY_RATE),
    ) {
        let ab = inner_join(&a.melt(), &b.melt()).unwrap();
        let ba = inner_join(&b.melt(), &a.melt()).unwrap();

        let left: Vec<Flat> = ab.records().iter().map(flatten).collect();
        let right: Vec<Flat> = ba.records().iter().map(flatten_swapped).collect();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_empty_selection_keeps_complete_records(
        a in wide_table(columns::ENROLLMENT_RATE),
        b in wide_table(columns::FERTILITY_RATE),
    ) {
        let dataset = inner_join(&a.melt(), &b.melt()).unwrap();
        let filtered = dataset.filter(&Selection::all());
        let complete: Vec<JoinedRecord> = dataset
            .records()
            .iter()
            .filter(|r| r.is_complete())
            .cloned()
            .collect();
        prop_assert_eq!(filtered.records(), complete.as_slice());
    }

    #[test]
    fn prop_filter_idempotent(
        a in wide_table(columns::ENROLLMENT_RATE),
        b in wide_table(columns::FERTILITY_RATE),
        picked_codes in proptest::collection::btree_set(0usize..12, 0..4),
        picked_years in proptest::collection::btree_set(1990i32..2030, 0..4),
    ) {
        let dataset = inner_join(&a.melt(), &b.melt()).unwrap();
        let selection = Selection::new(
            picked_codes.iter().map(|c| format!("C{c:02}")),
            picked_years,
        );

        let once = filter(dataset.records(), &selection);
        let twice = filter(once.records(), &selection);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_is_subset(
        a in wide_table(columns::ENROLLMENT_RATE),
        b in wide_table(columns::FERTILITY_RATE),
        picked_years in proptest::collection::btree_set(1990i32..2030, 1..4),
    ) {
        let dataset = inner_join(&a.melt(), &b.melt()).unwrap();
        let selection = Selection::all().with_years(picked_years.iter().copied());
        let filtered = dataset.filter(&selection);
        for record in &filtered {
            prop_assert!(picked_years.contains(&record.year));
            prop_assert!(record.is_complete());
            prop_assert!(dataset.records().contains(record));
        }
    }
}
