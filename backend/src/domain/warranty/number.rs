//! Warranty number newtype with a stable wire form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix shared by every issued warranty number.
const NUMBER_PREFIX: &str = "GAR";

/// Minimum width of the sequence segment; longer counters are not truncated.
const SEQUENCE_PADDING: usize = 5;

/// Human-readable warranty identifier, `GAR/<year>/<zero-padded counter>`.
///
/// Numbers are assigned once at creation by the issuer and are immutable for
/// the lifetime of the record.
///
/// # Examples
/// ```
/// use warranty_backend::domain::WarrantyNumber;
///
/// let number = WarrantyNumber::compose(2026, 42);
/// assert_eq!(number.as_str(), "GAR/2026/00042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarrantyNumber(String);

/// Error raised when a stored value does not parse as a warranty number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarrantyNumberError {
    value: String,
}

impl fmt::Display for ParseWarrantyNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid warranty number", self.value)
    }
}

impl std::error::Error for ParseWarrantyNumberError {}

impl WarrantyNumber {
    /// Compose a number from the issuing year and the allocated counter.
    pub fn compose(year: i32, sequence: i64) -> Self {
        Self(format!(
            "{NUMBER_PREFIX}/{year}/{sequence:0width$}",
            width = SEQUENCE_PADDING
        ))
    }

    /// Borrow the wire form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the number, returning the owned wire form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for WarrantyNumber {
    type Err = ParseWarrantyNumberError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseWarrantyNumberError {
            value: value.to_owned(),
        };

        let mut segments = value.splitn(3, '/');
        let prefix = segments.next().ok_or_else(invalid)?;
        let year = segments.next().ok_or_else(invalid)?;
        let sequence = segments.next().ok_or_else(invalid)?;

        if prefix != NUMBER_PREFIX
            || year.parse::<i32>().is_err()
            || sequence.len() < SEQUENCE_PADDING
            || sequence.parse::<i64>().is_err()
        {
            return Err(invalid());
        }

        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for WarrantyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
