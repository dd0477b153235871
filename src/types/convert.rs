use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use super::{RowValues, ValueKind, coerce};
use crate::error::SqlRecordError;

/// Conversion between a record field's Rust type and [`RowValues`].
///
/// `from_value` runs the incoming value through [`coerce`] first, so a scanned
/// `Int` can land in an `f64` field and a textual timestamp can land in a
/// `NaiveDateTime` field.
pub trait FieldValue: Sized {
    /// Declared kind of the field.
    const KIND: ValueKind;

    fn to_value(&self) -> RowValues;

    /// # Errors
    /// Returns `SqlRecordError::TypeMismatch` if the value cannot be represented
    /// by this type.
    fn from_value(value: RowValues) -> Result<Self, SqlRecordError>;
}

fn null_into(kind: ValueKind) -> SqlRecordError {
    SqlRecordError::TypeMismatch(format!("cannot assign NULL to non-nullable {kind} field"))
}

fn out_of_range(value: i64, ty: &str) -> SqlRecordError {
    SqlRecordError::TypeMismatch(format!("integer {value} out of range for {ty}"))
}

macro_rules! impl_sized_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn to_value(&self) -> RowValues {
                    RowValues::Int(i64::from(*self))
                }

                fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
                    match coerce(value, Self::KIND)? {
                        RowValues::Int(i) => {
                            <$ty>::try_from(i).map_err(|_| out_of_range(i, stringify!($ty)))
                        }
                        RowValues::Null => Err(null_into(Self::KIND)),
                        other => Err(SqlRecordError::TypeMismatch(format!(
                            "expected integer, found {}",
                            other.kind()
                        ))),
                    }
                }
            }
        )*
    };
}

impl_sized_int!(i8, i16, i32, u8, u16, u32);

impl FieldValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn to_value(&self) -> RowValues {
        RowValues::Int(*self)
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Int(i) => Ok(i),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected integer, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> RowValues {
        RowValues::Float(*self)
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Float(f) => Ok(f),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected float, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> RowValues {
        RowValues::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> RowValues {
        RowValues::Bool(*self)
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Bool(b) => Ok(b),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> RowValues {
        RowValues::Text(self.clone())
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Text(s) => Ok(s),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected text, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn to_value(&self) -> RowValues {
        RowValues::Timestamp(*self)
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Timestamp(ts) => Ok(ts),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected timestamp, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for JsonValue {
    const KIND: ValueKind = ValueKind::Json;

    fn to_value(&self) -> RowValues {
        RowValues::JSON(self.clone())
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::JSON(json) => Ok(json),
            RowValues::Null => Ok(JsonValue::Null),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected json, found {}",
                other.kind()
            ))),
        }
    }
}

impl FieldValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Blob;

    fn to_value(&self) -> RowValues {
        RowValues::Blob(self.clone())
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        match coerce(value, Self::KIND)? {
            RowValues::Blob(bytes) => Ok(bytes),
            RowValues::Null => Err(null_into(Self::KIND)),
            other => Err(SqlRecordError::TypeMismatch(format!(
                "expected blob, found {}",
                other.kind()
            ))),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> RowValues {
        self.as_ref().map_or(RowValues::Null, T::to_value)
    }

    fn from_value(value: RowValues) -> Result<Self, SqlRecordError> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}
