//! Polars integration for edufert
//!
//! Converts record sets, pivot tables and per-year distributions into
//! [`DataFrame`](polars::prelude::DataFrame)s for downstream charting, and
//! adds [`IndicatorStatsExt`] so the statistics engine can run directly on two
//! columns of any frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use edufert_polars::{records_to_frame, IndicatorStatsExt};
//! use edufert_core::columns;
//!
//! let df = records_to_frame(filtered.records())?;
//! let summary = df.indicator_summary(columns::ENROLLMENT_RATE, columns::FERTILITY_RATE)?;
//! println!("{summary}");
//! ```

mod error;
mod frame;
mod traits;

pub use error::{Error, Result};
pub use frame::{distribution_to_frame, pivot_to_frame, records_to_frame};
pub use traits::IndicatorStatsExt;
