//! Loose value coercion for settings fields.
//!
//! Clients send `volume` as a number or a numeric string and the boolean
//! flags as anything truthy. These helpers convert raw JSON values into the
//! typed field, failing with [`CoreError::Coercion`] where no conversion
//! exists.

use serde_json::Value;

use crate::error::CoreError;

/// Convert a JSON value into an `f64`.
///
/// Accepts numbers, numeric strings (surrounding whitespace ignored) and
/// booleans (`true` is `1.0`). Everything else, including NaN, is rejected.
pub fn to_f64(value: &Value, field: &'static str) -> Result<f64, CoreError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    match parsed {
        Some(v) if !v.is_nan() => Ok(v),
        _ => Err(CoreError::Coercion {
            field,
            expected: "number",
            value: value.to_string(),
        }),
    }
}

/// Truthiness of a JSON value.
///
/// `false`, `null`, zero, the empty string, the empty array and the empty
/// object are false; everything else is true.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Clamp a value into `[0.0, 1.0]`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
