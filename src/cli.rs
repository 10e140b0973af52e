use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use edufert::{CountryCode, JoinedDataset, PipelineConfig, Selection, Year};
use serde::Serialize;
use std::path::PathBuf;

/// Chart whose data is printed
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Enrollment vs. fertility points
    Scatter,
    /// Points plus the fitted regression line
    ScatterFit,
    /// Fertility distribution per year
    Box,
    /// Mean fertility per country and year
    Heatmap,
    /// Fertility and enrollment series of the selected countries
    DualAxis,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "edufert")]
#[command(about = "Correlate female secondary enrollment with total fertility rate", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enrollment table (wide CSV); overrides the config file
    #[arg(long, env = "EDUFERT_ENROLLMENT")]
    pub enrollment: Option<PathBuf>,

    /// Fertility table (wide CSV); overrides the config file
    #[arg(long, env = "EDUFERT_FERTILITY")]
    pub fertility: Option<PathBuf>,

    /// JSON pipeline configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Country codes to select
    #[arg(long = "country", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Country names to select, as spelled in the fertility table
    #[arg(long = "country-name")]
    pub country_names: Vec<String>,

    /// Years to select
    #[arg(long = "year", value_delimiter = ',')]
    pub years: Vec<Year>,

    /// First year of a selected range
    #[arg(long)]
    pub from: Option<Year>,

    /// Last year of a selected range
    #[arg(long)]
    pub to: Option<Year>,

    /// Chart data to print
    #[arg(long, value_enum, default_value = "scatter")]
    pub chart: ChartKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the filtered records to this file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Config file (or defaults) with the path arguments applied
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(path) = &self.enrollment {
            config.enrollment_path = path.clone();
        }
        if let Some(path) = &self.fertility {
            config.fertility_path = path.clone();
        }
        Ok(config)
    }

    /// Selection from the country and year arguments
    ///
    /// Names resolve through the dataset; an open-ended range is closed with
    /// the dataset's first or last year.
    pub fn selection(&self, dataset: &JoinedDataset) -> Result<Selection> {
        let mut codes: Vec<CountryCode> = self.countries.iter().map(CountryCode::new).collect();
        for name in &self.country_names {
            match dataset.code_for_name(name) {
                Some(code) => codes.push(code.clone()),
                None => bail!("no country named {name:?} in the dataset"),
            }
        }

        let mut selection = Selection::all()
            .with_countries(codes)
            .with_years(self.years.iter().copied());

        if self.from.is_some() || self.to.is_some() {
            let (Some(first), Some(last)) = (dataset.years().next(), dataset.years().last()) else {
                return Ok(selection);
            };
            let from = self.from.unwrap_or(first);
            let to = self.to.unwrap_or(last);
            if from > to {
                bail!("year range {from}..={to} is empty");
            }
            selection = selection.with_year_range(from..=to);
        }
        Ok(selection)
    }
}
