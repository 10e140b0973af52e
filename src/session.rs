//! Process-scoped dataset and the per-selection recompute pass

use edufert_core::{
    pivot, series, year_distribution, CountrySeries, FilteredRecords, JoinedDataset, Measure,
    PivotTable, Result, Selection, YearDistribution,
};
use edufert_io::PipelineConfig;
use edufert_stats::{summarize, StatisticsSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Outcome of the statistics step for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatisticsState {
    Ready(StatisticsSummary),
    /// The selection kept no complete pairs
    NoData,
    /// Too few pairs, or an indicator without spread
    Insufficient { reason: String },
}

impl StatisticsState {
    pub fn summary(&self) -> Option<&StatisticsSummary> {
        match self {
            Self::Ready(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Everything derived from one selection
///
/// Produced fresh by every [`Session::recompute`] call.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub selection: Selection,
    pub filtered: FilteredRecords,
    pub statistics: StatisticsState,
    /// Mean fertility per (country, year)
    pub pivot: PivotTable,
    /// One series per selected country with data; empty without a country selection
    pub series: Vec<CountrySeries>,
    /// Fertility distribution per year
    pub distribution: Vec<YearDistribution>,
}

/// Owner of the joined dataset
///
/// The dataset is loaded once and never mutated; clones share it.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<JoinedDataset>,
}

impl Session {
    /// Load and join both tables
    pub fn open(config: &PipelineConfig) -> edufert_io::Result<Self> {
        let dataset = edufert_io::load_and_join_with(config)?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_dataset(dataset: impl Into<Arc<JoinedDataset>>) -> Self {
        Self {
            dataset: dataset.into(),
        }
    }

    pub fn dataset(&self) -> &Arc<JoinedDataset> {
        &self.dataset
    }

    /// Filter, summarize and aggregate for one selection
    ///
    /// An empty or degenerate selection is reported through
    /// [`StatisticsState`]; only unexpected numeric failures are errors.
    #[instrument(skip_all, fields(
        countries = selection.countries().len(),
        years = selection.years().len(),
    ))]
    pub fn recompute(&self, selection: &Selection) -> Result<AnalysisView> {
        let filtered = self.dataset.filter(selection);

        let statistics = if filtered.is_empty() {
            StatisticsState::NoData
        } else {
            match summarize(&filtered) {
                Ok(summary) => StatisticsState::Ready(summary),
                Err(err) if err.is_insufficient_data() => StatisticsState::Insufficient {
                    reason: err.to_string(),
                },
                Err(err) => return Err(err),
            }
        };

        let per_country = selection
            .countries()
            .iter()
            .filter_map(|code| series(&filtered, code))
            .collect();

        let view = AnalysisView {
            selection: selection.clone(),
            pivot: pivot(&filtered, Measure::FertilityRate),
            distribution: year_distribution(&filtered, Measure::FertilityRate),
            series: per_country,
            statistics,
            filtered,
        };
        debug!(
            kept = view.filtered.len(),
            ready = view.statistics.summary().is_some(),
            "recomputed analysis view"
        );
        Ok(view)
    }
}
