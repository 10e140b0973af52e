//! Core data model and transforms for paired country indicators
//!
//! This crate holds everything between "a wide table was read" and "a
//! filtered record set is ready for statistics or charts":
//!
//! 1. **Reshape** - [`WideTable`] (one row per country, one column per year)
//!    melts into a [`LongTable`] (one row per country and year).
//! 2. **Join** - [`inner_join`] pairs the enrollment and fertility long tables
//!    on `(country code, year)` into an immutable [`JoinedDataset`].
//! 3. **Filter** - [`filter`] applies a [`Selection`] and keeps only complete
//!    pairs, producing a fresh [`FilteredRecords`].
//! 4. **Aggregate** - [`pivot`], [`series`] and [`year_distribution`] shape
//!    the filtered set for matrix, dual-axis and box-plot presentation.
//!
//! # Example
//!
//! ```rust
//! use edufert_core::{inner_join, filter, CountryCode, Selection, WideRow, WideTable};
//!
//! let enrollment = WideTable::new(
//!     "Female Enrollment Rate",
//!     vec![2015, 2016],
//!     vec![WideRow::new("Chinaland", "CHN", vec![Some(90.1), Some(91.0)])],
//! ).unwrap();
//! let fertility = WideTable::new(
//!     "TFR",
//!     vec![2015, 2016],
//!     vec![WideRow::new("Chinaland", "CHN", vec![Some(1.6), Some(1.5)])],
//! ).unwrap();
//!
//! let dataset = inner_join(&enrollment.melt(), &fertility.melt()).unwrap();
//! let filtered = filter(dataset.records(), &Selection::all());
//! assert_eq!(filtered.len(), 2);
//! assert!(filtered.codes().contains(&CountryCode::new("CHN")));
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod join;
pub mod reshape;
pub mod types;

pub use aggregate::{
    pivot, series, series_for_all, year_distribution, CountrySeries, PivotRow, PivotTable,
    YearDistribution,
};
pub use dataset::JoinedDataset;
pub use error::{Error, Result};
pub use filter::{filter, FilteredRecords, Selection};
pub use join::inner_join;
pub use reshape::{LongTable, WideRow, WideTable};
pub use types::{columns, CountryCode, CountryLabels, JoinedRecord, LongRecord, Measure, Year};
