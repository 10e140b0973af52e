//! Configuration types for loading and exporting tables

use crate::{Error, Result};
use edufert_core::columns;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Cell texts read as a missing value unless configured otherwise
pub const DEFAULT_MISSING_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "#N/A", ".."];

/// Default enrollment table file name
pub const DEFAULT_ENROLLMENT_PATH: &str = "中等教育女性毛入学率.csv";

/// Default fertility table file name
pub const DEFAULT_FERTILITY_PATH: &str = "总和生育率.csv";

/// How one wide table is parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Label of the indicator, used in errors and as the long-table name
    pub indicator: String,
    pub name_column: String,
    pub code_column: String,
    /// Field separator; must be ASCII
    pub delimiter: char,
    /// Cell texts (after trimming) that mean "no value"
    pub missing_values: Vec<String>,
    /// Non-year columns to skip, e.g. `Indicator Code`
    pub ignored_columns: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            indicator: "value".to_string(),
            name_column: columns::COUNTRY_NAME.to_string(),
            code_column: columns::COUNTRY_CODE.to_string(),
            delimiter: ',',
            missing_values: DEFAULT_MISSING_VALUES.iter().map(|s| s.to_string()).collect(),
            ignored_columns: Vec::new(),
        }
    }
}

impl LoaderConfig {
    /// Defaults for the female secondary enrollment table
    pub fn enrollment() -> Self {
        Self::default().with_indicator(columns::ENROLLMENT_RATE)
    }

    /// Defaults for the total fertility rate table
    pub fn fertility() -> Self {
        Self::default().with_indicator(columns::FERTILITY_RATE)
    }

    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = indicator.into();
        self
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    pub fn with_code_column(mut self, column: impl Into<String>) -> Self {
        self.code_column = column.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the missing-value sentinels
    pub fn with_missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Add columns to skip
    pub fn with_ignored_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn is_missing(&self, cell: &str) -> bool {
        self.missing_values.iter().any(|m| m == cell)
    }

    pub fn is_ignored(&self, header: &str) -> bool {
        self.ignored_columns.iter().any(|c| c == header)
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        ascii_delimiter(self.delimiter)
    }
}

/// Fields of a nested `LoaderConfig` block in a pipeline document
///
/// Absent fields keep the defaults of the table the block belongs to.
#[derive(Debug, Default, Deserialize)]
struct LoaderOverrides {
    indicator: Option<String>,
    name_column: Option<String>,
    code_column: Option<String>,
    delimiter: Option<char>,
    missing_values: Option<Vec<String>>,
    ignored_columns: Option<Vec<String>>,
}

impl LoaderOverrides {
    fn apply(self, base: LoaderConfig) -> LoaderConfig {
        LoaderConfig {
            indicator: self.indicator.unwrap_or(base.indicator),
            name_column: self.name_column.unwrap_or(base.name_column),
            code_column: self.code_column.unwrap_or(base.code_column),
            delimiter: self.delimiter.unwrap_or(base.delimiter),
            missing_values: self.missing_values.unwrap_or(base.missing_values),
            ignored_columns: self.ignored_columns.unwrap_or(base.ignored_columns),
        }
    }
}

fn enrollment_loader<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<LoaderConfig, D::Error> {
    Ok(LoaderOverrides::deserialize(deserializer)?.apply(LoaderConfig::enrollment()))
}

fn fertility_loader<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<LoaderConfig, D::Error> {
    Ok(LoaderOverrides::deserialize(deserializer)?.apply(LoaderConfig::fertility()))
}

/// How a filtered record set is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field separator; must be ASCII. Unset means `,`, or the input
    /// delimiter when resolved through [`PipelineConfig::export_config`]
    pub delimiter: Option<char>,
    /// Text written for a missing value
    pub missing_value: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            missing_value: String::new(),
        }
    }
}

impl ExportConfig {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_missing_value(mut self, text: impl Into<String>) -> Self {
        self.missing_value = text.into();
        self
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        ascii_delimiter(self.delimiter.unwrap_or(','))
    }
}

/// Everything a run needs to know about its inputs and outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub enrollment_path: PathBuf,
    pub fertility_path: PathBuf,
    #[serde(deserialize_with = "enrollment_loader")]
    pub enrollment: LoaderConfig,
    #[serde(deserialize_with = "fertility_loader")]
    pub fertility: LoaderConfig,
    pub export: ExportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enrollment_path: PathBuf::from(DEFAULT_ENROLLMENT_PATH),
            fertility_path: PathBuf::from(DEFAULT_FERTILITY_PATH),
            enrollment: LoaderConfig::enrollment(),
            fertility: LoaderConfig::fertility(),
            export: ExportConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new(enrollment_path: impl Into<PathBuf>, fertility_path: impl Into<PathBuf>) -> Self {
        Self {
            enrollment_path: enrollment_path.into(),
            fertility_path: fertility_path.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Export settings, writing with the enrollment table's delimiter unless
    /// one is set for the export
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            delimiter: Some(self.export.delimiter.unwrap_or(self.enrollment.delimiter)),
            ..self.export.clone()
        }
    }
}

fn ascii_delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(Error::Config(format!(
            "delimiter {delimiter:?} must be a single ASCII character"
        )))
    }
}
