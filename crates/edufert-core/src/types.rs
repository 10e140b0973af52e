//! Record types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Calendar year of an observation
pub type Year = i32;

/// Column names used by the source tables and the filtered export
pub mod columns {
    pub const COUNTRY_NAME: &str = "Country Name";
    pub const COUNTRY_CODE: &str = "Country Code";
    pub const YEAR: &str = "Year";
    pub const COUNTRY_NAME_EDU: &str = "Country Name_edu";
    pub const COUNTRY_NAME_FERT: &str = "Country Name_fert";
    pub const ENROLLMENT_RATE: &str = "Female Enrollment Rate";
    pub const FERTILITY_RATE: &str = "TFR";
}

/// Canonical country identifier, the authoritative join key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two measured indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Female gross enrollment rate in secondary education (%)
    EnrollmentRate,
    /// Total fertility rate (births per woman)
    FertilityRate,
}

impl Measure {
    /// Column label used in tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnrollmentRate => columns::ENROLLMENT_RATE,
            Self::FertilityRate => columns::FERTILITY_RATE,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One `(country, year, value)` row of a long table
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub country_name: String,
    pub country_code: CountryCode,
    pub year: Year,
    /// `None` when the source cell was empty or a missing-value sentinel
    pub value: Option<f64>,
}

/// Display names of one country as spelled by each source table
///
/// Both names belong to the same canonical [`CountryCode`]; they are kept
/// together so aggregation can never treat them as two countries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryLabels {
    /// Name from the enrollment table
    pub enrollment: String,
    /// Name from the fertility table
    pub fertility: String,
}

impl CountryLabels {
    pub fn new(enrollment: impl Into<String>, fertility: impl Into<String>) -> Self {
        Self {
            enrollment: enrollment.into(),
            fertility: fertility.into(),
        }
    }
}

/// One `(country code, year)` pair present in both source tables
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub country_code: CountryCode,
    pub year: Year,
    /// Shared with every other record of the same code
    pub labels: Arc<CountryLabels>,
    pub enrollment_rate: Option<f64>,
    pub fertility_rate: Option<f64>,
}

impl JoinedRecord {
    /// Value of one indicator
    pub fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::EnrollmentRate => self.enrollment_rate,
            Measure::FertilityRate => self.fertility_rate,
        }
    }

    /// `(enrollment, fertility)` when both are present
    pub fn pair(&self) -> Option<(f64, f64)> {
        match (self.enrollment_rate, self.fertility_rate) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pair().is_some()
    }

    pub fn key(&self) -> (&CountryCode, Year) {
        (&self.country_code, self.year)
    }
}
