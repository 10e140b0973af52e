//! Reading and writing indicator tables
//!
//! The two source files are wide CSV tables (`Country Name`, `Country Code`,
//! then one column per year). This crate parses them into
//! [`edufert_core::WideTable`]s, joins them into a
//! [`edufert_core::JoinedDataset`], and writes a filtered record set back out
//! in the same delimited format.
//!
//! # Example
//!
//! ```rust,ignore
//! use edufert_io::{load_and_join, write_records, ExportConfig};
//! use edufert_core::Selection;
//!
//! let dataset = load_and_join("enrollment.csv", "fertility.csv")?;
//! let filtered = dataset.filter(&Selection::all().with_year_range(2015..=2023));
//! write_records(filtered.records(), std::io::stdout(), &ExportConfig::default())?;
//! ```

mod config;
mod error;
mod export;
mod loader;

pub use config::*;
pub use error::{Error, Result};
pub use export::{export_to_path, read_export, to_csv_bytes, write_records};
pub use loader::{load_and_join, load_and_join_with, load_long, load_wide, read_wide};
