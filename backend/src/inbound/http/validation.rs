//! Shared validation helpers for the HTTP adapter.
//!
//! All helpers produce `invalid_request` domain errors carrying a
//! `{field, code}` details object so clients can pinpoint the offending
//! input.

use serde_json::{Value, json};

use crate::domain::Error;

/// Error raised when a required body field is absent or empty.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn invalid_age_error(value: impl Into<String>) -> Error {
    Error::invalid_request("age must be an integer").with_details(json!({
        "field": "age",
        "value": value.into(),
        "code": "invalid_age",
    }))
}

/// Coerce a JSON `age` value to an integer.
///
/// The wire contract accepts either a JSON number or numeric text
/// (`"30"` stores `30`); anything else is rejected. Text must be a whole
/// integer: `"30.5"` and `"30abc"` are 400s, never truncated to `30` the way
/// a lenient `parseInt`-style parse would.
pub(crate) fn coerce_age(value: &Value) -> Result<i32, Error> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .and_then(|age| i32::try_from(age).ok())
            .ok_or_else(|| invalid_age_error(number.to_string())),
        Value::String(text) => text
            .trim()
            .parse::<i32>()
            .map_err(|_| invalid_age_error(text.clone())),
        other => Err(invalid_age_error(other.to_string())),
    }
}

/// Coerce an `age` query parameter to an integer.
pub(crate) fn coerce_age_param(text: &str) -> Result<i32, Error> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| invalid_age_error(text))
}
