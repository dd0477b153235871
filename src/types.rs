use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

mod coerce;
mod convert;

pub use coerce::coerce;
pub use convert::FieldValue;

/// Values that can be stored in a database row, bound as query parameters, or held
/// by a record field.
///
/// ```rust
/// use sql_record::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

/// The declared kind of a record field, or the runtime kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Text,
    Bool,
    Timestamp,
    Json,
    Blob,
    Null,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Bool => "boolean",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Json => "json",
            ValueKind::Blob => "blob",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            RowValues::Int(_) => ValueKind::Int,
            RowValues::Float(_) => ValueKind::Float,
            RowValues::Text(_) => ValueKind::Text,
            RowValues::Bool(_) => ValueKind::Bool,
            RowValues::Timestamp(_) => ValueKind::Timestamp,
            RowValues::Null => ValueKind::Null,
            RowValues::JSON(_) => ValueKind::Json,
            RowValues::Blob(_) => ValueKind::Blob,
        }
    }

    /// Whether this is the zero value of its kind.
    ///
    /// An identity holding its zero value is treated as "not yet assigned" on insert.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            RowValues::Int(i) => *i == 0,
            RowValues::Float(f) => *f == 0.0,
            RowValues::Text(s) => s.is_empty(),
            RowValues::Bool(b) => !*b,
            RowValues::Timestamp(ts) => *ts == NaiveDateTime::default(),
            RowValues::Null => true,
            RowValues::JSON(v) => v.is_null(),
            RowValues::Blob(bytes) => bytes.is_empty(),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            return coerce::parse_timestamp(s);
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl From<JsonValue> for RowValues {
    fn from(value: JsonValue) -> Self {
        RowValues::JSON(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}
