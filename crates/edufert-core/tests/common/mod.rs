//! Common test utilities for edufert-core tests

use edufert_core::{columns, WideRow, WideTable, Year};
use proptest::prelude::*;

/// Enrollment table of the two-year Chinaland scenario
pub fn chinaland_enrollment() -> WideTable {
    WideTable::new(
        columns::ENROLLMENT_RATE,
        vec![2015, 2016],
        vec![WideRow::new("Chinaland", "CHN", vec![Some(90.1), Some(91.0)])],
    )
    .unwrap()
}

/// Fertility table of the two-year Chinaland scenario
pub fn chinaland_fertility() -> WideTable {
    WideTable::new(
        columns::FERTILITY_RATE,
        vec![2015, 2016],
        vec![WideRow::new("Chinaland", "CHN", vec![Some(1.6), Some(1.5)])],
    )
    .unwrap()
}

/// Strategy for a cell: mostly present, sometimes missing
pub fn cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (0.0f64..150.0).prop_map(Some),
        1 => Just(None),
    ]
}

/// Strategy for a valid wide table with 1-5 years and 1-8 countries drawn
/// from a small shared pool of codes
pub fn wide_table(indicator: &'static str) -> impl Strategy<Value = WideTable> {
    (
        proptest::collection::btree_set(1990i32..2030, 1..6),
        proptest::collection::btree_set(0usize..12, 1..8),
    )
        .prop_flat_map(move |(years, codes)| {
            let years: Vec<Year> = years.into_iter().collect();
            let codes: Vec<usize> = codes.into_iter().collect();
            let width = years.len();
            proptest::collection::vec(proptest::collection::vec(cell(), width), codes.len())
                .prop_map(move |cells| {
                    let rows = codes
                        .iter()
                        .zip(cells)
                        .map(|(&c, values)| {
                            WideRow::new(format!("{indicator} country {c}"), format!("C{c:02}"), values)
                        })
                        .collect();
                    WideTable::new(indicator, years.clone(), rows).unwrap()
                })
        })
}
