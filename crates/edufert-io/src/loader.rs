//! Wide-table CSV loading

use crate::config::{LoaderConfig, PipelineConfig};
use crate::{Error, Result};
use edufert_core::{inner_join, JoinedDataset, LongTable, WideRow, WideTable, Year};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

const BOM: char = '\u{feff}';

/// Where each column of the header goes
struct Layout {
    name: usize,
    code: usize,
    /// `(column index, year)` for every year column, in file order
    years: Vec<(usize, Year)>,
}

impl Layout {
    fn from_headers(headers: &csv::StringRecord, config: &LoaderConfig) -> Result<Self> {
        let mut name = None;
        let mut code = None;
        let mut years = Vec::new();

        for (index, raw) in headers.iter().enumerate() {
            let header = raw.trim().trim_start_matches(BOM).trim();
            let slot = if header == config.name_column {
                Some(&mut name)
            } else if header == config.code_column {
                Some(&mut code)
            } else {
                None
            };
            if let Some(slot) = slot {
                if slot.replace(index).is_some() {
                    return Err(Error::malformed(format!(
                        "{} table has more than one {header:?} column",
                        config.indicator
                    )));
                }
            } else if config.is_ignored(header) {
                continue;
            } else {
                let year = header.parse::<Year>().map_err(|_| {
                    Error::malformed(format!(
                        "column header {header:?} in {} is not a year",
                        config.indicator
                    ))
                })?;
                years.push((index, year));
            }
        }

        let missing = |column: &str| {
            Error::malformed(format!(
                "{} table has no {column:?} column",
                config.indicator
            ))
        };
        Ok(Self {
            name: name.ok_or_else(|| missing(config.name_column.as_str()))?,
            code: code.ok_or_else(|| missing(config.code_column.as_str()))?,
            years,
        })
    }
}

fn parse_cell(cell: &str, config: &LoaderConfig, line: u64) -> Result<Option<f64>> {
    let cell = cell.trim();
    if config.is_missing(cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Error::malformed(format!(
            "line {line} of {}: {cell:?} is not a number",
            config.indicator
        ))),
    }
}

/// Parse one wide table from any reader
///
/// Fails on a missing identifier column, a header that is neither an
/// identifier, an ignored column nor a year, a cell that is neither a number
/// nor a missing-value sentinel, and repeated codes or years.
pub fn read_wide<R: Read>(reader: R, config: &LoaderConfig) -> Result<WideTable> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .from_reader(reader);

    let layout = Layout::from_headers(csv.headers()?, config)?;
    let years: Vec<Year> = layout.years.iter().map(|&(_, year)| year).collect();

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let code = field(layout.code);
        if code.is_empty() {
            return Err(Error::malformed(format!(
                "line {line} of {} has an empty country code",
                config.indicator
            )));
        }

        let values = layout
            .years
            .iter()
            .map(|&(index, _)| parse_cell(field(index), config, line))
            .collect::<Result<Vec<_>>>()?;
        rows.push(WideRow::new(field(layout.name), code, values));
    }

    debug!(
        indicator = %config.indicator,
        rows = rows.len(),
        years = years.len(),
        "read wide table"
    );
    Ok(WideTable::new(config.indicator.clone(), years, rows)?)
}

/// Load a wide table from a file
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_wide(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<WideTable> {
    let file = File::open(path.as_ref())?;
    read_wide(file, config)
}

/// Load a wide table from a file and melt it
pub fn load_long(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<LongTable> {
    Ok(load_wide(path, config)?.melt())
}

/// Load both indicator tables with default settings and join them
///
/// Nothing is returned unless both tables load and join cleanly.
pub fn load_and_join(
    enrollment_path: impl AsRef<Path>,
    fertility_path: impl AsRef<Path>,
) -> Result<JoinedDataset> {
    let config = PipelineConfig::new(
        enrollment_path.as_ref(),
        fertility_path.as_ref(),
    );
    load_and_join_with(&config)
}

/// Load both indicator tables as configured and join them
#[instrument(skip_all, fields(
    enrollment = %config.enrollment_path.display(),
    fertility = %config.fertility_path.display(),
))]
pub fn load_and_join_with(config: &PipelineConfig) -> Result<JoinedDataset> {
    let enrollment = load_long(&config.enrollment_path, &config.enrollment)?;
    let fertility = load_long(&config.fertility_path, &config.fertility)?;
    let dataset = inner_join(&enrollment, &fertility)?;
    debug!(
        records = dataset.len(),
        countries = dataset.codes().count(),
        "loaded joined dataset"
    );
    Ok(dataset)
}
