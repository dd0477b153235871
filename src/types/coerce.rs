use chrono::{DateTime, NaiveDateTime};
use serde_json::Value as JsonValue;

use super::{RowValues, ValueKind};
use crate::error::SqlRecordError;

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse the textual timestamp layouts accepted when coercing text into a timestamp.
pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

fn mismatch(value: &RowValues, target: ValueKind) -> SqlRecordError {
    SqlRecordError::TypeMismatch(format!(
        "cannot convert {} value to {target}",
        value.kind()
    ))
}

/// Convert `value` into the representation of `target`.
///
/// Only the pairs listed below are convertible; everything else is a
/// `TypeMismatch`. `Null` passes through untouched so the caller can decide whether
/// the destination accepts it.
///
/// | from      | to                                              |
/// |-----------|-------------------------------------------------|
/// | Int       | Float, Bool (0/1), JSON                         |
/// | Float     | Int (integral, in range), JSON                  |
/// | Text      | Timestamp (parsed), JSON (parsed), Blob (UTF-8) |
/// | Bool      | Int (0/1), JSON                                 |
/// | Timestamp | Text                                            |
/// | JSON      | Int, Float, Text, Bool (matching JSON scalar)   |
/// | Blob      | Text (valid UTF-8)                              |
///
/// # Errors
/// Returns `SqlRecordError::TypeMismatch` when the pair is not in the table or the
/// value does not fit the target.
pub fn coerce(value: RowValues, target: ValueKind) -> Result<RowValues, SqlRecordError> {
    if value.kind() == target || value.is_null() {
        return Ok(value);
    }

    let converted = match (&value, target) {
        (RowValues::Int(i), ValueKind::Float) => {
            #[allow(clippy::cast_precision_loss)]
            let f = *i as f64;
            Some(RowValues::Float(f))
        }
        (RowValues::Int(i), ValueKind::Bool) => match *i {
            0 => Some(RowValues::Bool(false)),
            1 => Some(RowValues::Bool(true)),
            _ => None,
        },
        (RowValues::Int(i), ValueKind::Json) => Some(RowValues::JSON(JsonValue::from(*i))),
        (RowValues::Float(f), ValueKind::Int) => float_to_int(*f).map(RowValues::Int),
        (RowValues::Float(f), ValueKind::Json) => {
            serde_json::Number::from_f64(*f).map(|n| RowValues::JSON(JsonValue::Number(n)))
        }
        (RowValues::Text(s), ValueKind::Timestamp) => parse_timestamp(s).map(RowValues::Timestamp),
        (RowValues::Text(s), ValueKind::Json) => serde_json::from_str(s).ok().map(RowValues::JSON),
        (RowValues::Text(s), ValueKind::Blob) => Some(RowValues::Blob(s.as_bytes().to_vec())),
        (RowValues::Bool(b), ValueKind::Int) => Some(RowValues::Int(i64::from(*b))),
        (RowValues::Bool(b), ValueKind::Json) => Some(RowValues::JSON(JsonValue::Bool(*b))),
        (RowValues::Timestamp(ts), ValueKind::Text) => {
            Some(RowValues::Text(ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()))
        }
        (RowValues::JSON(json), _) => json_scalar(json, target),
        (RowValues::Blob(bytes), ValueKind::Text) => {
            String::from_utf8(bytes.clone()).ok().map(RowValues::Text)
        }
        _ => None,
    };

    converted.ok_or_else(|| mismatch(&value, target))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(f: f64) -> Option<i64> {
    if f.fract() != 0.0 || !f.is_finite() {
        return None;
    }
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    Some(f as i64)
}

fn json_scalar(json: &JsonValue, target: ValueKind) -> Option<RowValues> {
    match target {
        ValueKind::Int => json.as_i64().map(RowValues::Int),
        ValueKind::Float => json.as_f64().map(RowValues::Float),
        ValueKind::Bool => json.as_bool().map(RowValues::Bool),
        ValueKind::Text => match json {
            JsonValue::String(s) => Some(RowValues::Text(s.clone())),
            other => Some(RowValues::Text(other.to_string())),
        },
        _ => None,
    }
}
