//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry dates, times and statuses as strings; these helpers
//! parse them into domain values and describe failures with a `details`
//! object naming the offending field.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::domain::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
const TIME_OUTPUT_FORMAT: &str = "%H:%M";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidDate,
    InvalidTime,
    InvalidStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidTime => "invalid_time",
            ErrorCode::InvalidStatus => "invalid_status",
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

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid_value(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        invalid_value(
            field,
            ErrorCode::InvalidDate,
            format!("{} must be a date formatted as YYYY-MM-DD", field.as_str()),
            value,
        )
    })
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub(crate) fn parse_time(value: &str, field: FieldName) -> Result<NaiveTime, Error> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            invalid_value(
                field,
                ErrorCode::InvalidTime,
                format!("{} must be a time formatted as HH:MM", field.as_str()),
                value,
            )
        })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

pub(crate) fn parse_optional_time(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveTime>, Error> {
    value.map(|raw| parse_time(raw, field)).transpose()
}

/// Parse a lifecycle status; `allowed` lists the accepted wire values.
pub(crate) fn parse_status<S: FromStr>(
    value: &str,
    field: FieldName,
    allowed: &[&str],
) -> Result<S, Error> {
    S::from_str(value).map_err(|_| {
        invalid_value(
            field,
            ErrorCode::InvalidStatus,
            format!("{} must be one of: {}", field.as_str(), allowed.join(", ")),
            value,
        )
    })
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_OUTPUT_FORMAT).to_string()
}
