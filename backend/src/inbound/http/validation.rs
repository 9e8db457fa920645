//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_input(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    invalid_value_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        value,
    )
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| invalid_uuid_error(field, &value))
}

pub(crate) fn parse_optional_uuid(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value.map(|raw| parse_uuid(raw, field)).transpose()
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    invalid_value_error(
        field,
        format!("{name} must be an ISO 8601 calendar date"),
        ErrorCode::InvalidDate,
        value,
    )
}

pub(crate) fn parse_date(value: String, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| invalid_date_error(field, &value))
}

pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}
