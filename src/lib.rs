//! Female secondary enrollment vs. total fertility rate
//!
//! Re-exports the workspace crates and adds [`Session`], the owner of the
//! joined dataset that every filter change is recomputed against.
//!
//! - [`edufert_core`]: data model, reshape, join, filter, aggregation
//! - [`edufert_stats`]: Pearson, Spearman and OLS summaries
//! - [`edufert_io`]: CSV loading and export
//! - `edufert_polars` (feature `polars`): DataFrame bridge
//!
//! # Example
//!
//! ```rust,ignore
//! use edufert::{PipelineConfig, Selection, Session, StatisticsState};
//!
//! let session = Session::open(&PipelineConfig::default())?;
//! let view = session.recompute(&Selection::all().with_year_range(2015..=2023))?;
//! if let StatisticsState::Ready(summary) = &view.statistics {
//!     println!("{summary}");
//! }
//! ```

mod session;

pub use edufert_core::{
    columns, filter, inner_join, pivot, series, series_for_all, year_distribution, CountryCode,
    CountryLabels, CountrySeries, Error, FilteredRecords, JoinedDataset, JoinedRecord, LongRecord,
    LongTable, Measure, PivotRow, PivotTable, Result, Selection, WideRow, WideTable, Year,
    YearDistribution,
};
pub use edufert_io::{
    export_to_path, load_and_join, load_and_join_with, load_long, load_wide, read_export,
    read_wide, to_csv_bytes, write_records, ExportConfig, LoaderConfig, PipelineConfig,
};
pub use edufert_stats::{
    average_ranks, correlation_p_value, summarize, summarize_pairs, Correlation,
    CorrelationEstimator, LinearFit, OrdinaryLeastSquares, Pearson, Spearman, StatisticsSummary,
};
pub use session::{AnalysisView, Session, StatisticsState};

pub use edufert_core as data;
pub use edufert_io as io;
pub use edufert_stats as stats;

#[cfg(feature = "polars")]
pub use edufert_polars as frames;
