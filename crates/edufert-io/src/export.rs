//! Delimited export of a record set and the matching reader

use crate::config::ExportConfig;
use crate::{Error, Result};
use edufert_core::{columns, CountryCode, CountryLabels, JoinedDataset, JoinedRecord, Year};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Export column order
const HEADERS: [&str; 6] = [
    columns::COUNTRY_NAME_EDU,
    columns::COUNTRY_CODE,
    columns::YEAR,
    columns::ENROLLMENT_RATE,
    columns::COUNTRY_NAME_FERT,
    columns::FERTILITY_RATE,
];

fn format_value(value: Option<f64>, config: &ExportConfig) -> String {
    // `Display` for f64 is the shortest text that parses back to the same value
    value.map_or_else(|| config.missing_value.clone(), |v| v.to_string())
}

/// Write records in the joined-record schema
pub fn write_records<W: Write>(
    records: &[JoinedRecord],
    writer: W,
    config: &ExportConfig,
) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(writer);

    csv.write_record(HEADERS)?;
    for record in records {
        csv.write_record([
            record.labels.enrollment.clone(),
            record.country_code.to_string(),
            record.year.to_string(),
            format_value(record.enrollment_rate, config),
            record.labels.fertility.clone(),
            format_value(record.fertility_rate, config),
        ])?;
    }
    csv.flush()?;

    debug!(records = records.len(), "exported records");
    Ok(())
}

/// Export into an in-memory buffer, e.g. for a download
pub fn to_csv_bytes(records: &[JoinedRecord], config: &ExportConfig) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, config)?;
    Ok(buffer)
}

#[instrument(skip_all, fields(path = %path.as_ref().display(), records = records.len()))]
pub fn export_to_path(
    records: &[JoinedRecord],
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_records(records, file, config)
}

/// Parse an export back into a dataset
pub fn read_export<R: Read>(reader: R, config: &ExportConfig) -> Result<JoinedDataset> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_reader(reader);

    let headers = csv.headers()?;
    let mut index = [0usize; HEADERS.len()];
    for (slot, name) in index.iter_mut().zip(HEADERS) {
        *slot = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| Error::malformed(format!("export has no {name:?} column")))?;
    }
    let [edu_name_col, code_col, year_col, enrollment_col, fert_name_col, fertility_col] = index;

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let field = |i: usize| row.get(i).unwrap_or("");
        let number = |i: usize| -> Result<Option<f64>> {
            let cell = field(i);
            if cell == config.missing_value || cell.is_empty() {
                return Ok(None);
            }
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => Err(Error::malformed(format!("line {line}: {cell:?} is not a number"))),
            }
        };

        let year: Year = field(year_col)
            .parse()
            .map_err(|_| Error::malformed(format!("line {line}: bad year {:?}", field(year_col))))?;
        records.push(JoinedRecord {
            country_code: CountryCode::new(field(code_col)),
            year,
            labels: Arc::new(CountryLabels::new(field(edu_name_col), field(fert_name_col))),
            enrollment_rate: number(enrollment_col)?,
            fertility_rate: number(fertility_col)?,
        });
    }

    Ok(JoinedDataset::new(records)?)
}
