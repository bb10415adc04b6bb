use csv::ByteRecord;
use std::borrow::Cow;
use tracing::warn;

use super::LoadError;

/// Number of comma-separated fields every data line is expected to carry.
pub const EXPECTED_FIELDS: usize = 18;

pub const COUNTY_COLUMN: usize = 2;
pub const TIV_2011_COLUMN: usize = 7;
pub const TIV_2012_COLUMN: usize = 8;

/// One data line of the insurance CSV, reduced to the columns we aggregate on.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRecord {
    county: String,
    tiv_2011: f64,
    tiv_2012: f64,
}

impl PolicyRecord {
    pub fn new(county: impl Into<String>, tiv_2011: f64, tiv_2012: f64) -> Self {
        Self {
            county: county.into(),
            tiv_2011,
            tiv_2012,
        }
    }

    /// Build a record from a raw CSV row found on `line` (1-based, header included).
    ///
    /// Rows that do not reach the 2012 column are rejected. Rows that do but
    /// don't have exactly `EXPECTED_FIELDS` fields are kept and logged.
    pub fn from_row(row: &ByteRecord, line: u64) -> Result<Self, LoadError> {
        if row.len() <= TIV_2012_COLUMN {
            return Err(LoadError::MissingFields {
                line,
                found: row.len(),
            });
        }
        if row.len() != EXPECTED_FIELDS {
            warn!(
                line,
                found = row.len(),
                expected = EXPECTED_FIELDS,
                "unexpected field count"
            );
        }

        Ok(Self {
            county: field(row, COUNTY_COLUMN).into_owned(),
            tiv_2011: parse_value(row, TIV_2011_COLUMN, line)?,
            tiv_2012: parse_value(row, TIV_2012_COLUMN, line)?,
        })
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn tiv_2011(&self) -> f64 {
        self.tiv_2011
    }

    pub fn tiv_2012(&self) -> f64 {
        self.tiv_2012
    }

    /// Year-over-year change of the insured value.
    pub fn increase(&self) -> f64 {
        self.tiv_2012 - self.tiv_2011
    }
}

// invalid UTF-8 becomes U+FFFD, same as a replacing decoder would
fn field(row: &ByteRecord, column: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(row.get(column).unwrap_or_default())
}

fn parse_value(row: &ByteRecord, column: usize, line: u64) -> Result<f64, LoadError> {
    let raw = field(row, column);
    raw.trim()
        .parse::<f64>()
        .map_err(|source| LoadError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
            source,
        })
}
