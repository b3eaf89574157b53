//! Field access helpers for structured configuration
//!
//! Configuration arrives as `serde_json::Value`. A key holding `null`
//! is treated the same as a missing key.

use crate::error::{ParseError, Result};
use flagrule_core::types::json_type_name;
use serde_json::Value as JsonValue;

/// Get a field, treating `null` as absent
pub fn get_present<'a>(obj: &'a JsonValue, field: &str) -> Option<&'a JsonValue> {
    obj.get(field).filter(|v| !v.is_null())
}

/// Get an optional string field, erroring when present with another type
pub fn get_optional_string(obj: &JsonValue, field: &str) -> Result<Option<String>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ParseError::invalid_value(
            field,
            format!("expected a string, got {}", json_type_name(other)),
        )),
    }
}

/// Get an optional number field as f64
pub fn get_optional_f64(obj: &JsonValue, field: &str) -> Result<Option<f64>> {
    match get_present(obj, field) {
        None => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid_value(field, "number is not representable")),
        Some(other) => Err(ParseError::invalid_value(
            field,
            format!("expected a number, got {}", json_type_name(other)),
        )),
    }
}

/// Get an optional array field, with an empty slice when absent
pub fn get_sequence<'a>(obj: &'a JsonValue, field: &str) -> Result<&'a [JsonValue]> {
    match get_present(obj, field) {
        None => Ok(&[]),
        Some(JsonValue::Array(items)) => Ok(items),
        Some(other) => Err(ParseError::invalid_value(
            field,
            format!("expected a sequence, got {}", json_type_name(other)),
        )),
    }
}
