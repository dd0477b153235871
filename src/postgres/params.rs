use std::error::Error;

use chrono::NaiveDateTime;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::types::{RowValues, ValueKind, coerce};

/// Borrowed driver parameters for a slice of `RowValues`.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    #[must_use]
    pub fn convert(params: &'a [RowValues]) -> Params<'a> {
        let mut references = Vec::with_capacity(params.len());
        for p in params {
            references.push(p as &(dyn ToSql + Sync));
        }
        Params { references }
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
        &self.references
    }
}

type BoxedSqlError = Box<dyn Error + Sync + Send>;

/// Value kind a parameter must take before it is encoded for `ty`.
fn target_kind(ty: &Type) -> Option<ValueKind> {
    match *ty {
        Type::INT2 | Type::INT4 | Type::INT8 => Some(ValueKind::Int),
        Type::FLOAT4 | Type::FLOAT8 => Some(ValueKind::Float),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => Some(ValueKind::Text),
        Type::BOOL => Some(ValueKind::Bool),
        Type::TIMESTAMP | Type::TIMESTAMPTZ | Type::DATE => Some(ValueKind::Timestamp),
        Type::JSON | Type::JSONB => Some(ValueKind::Json),
        Type::BYTEA => Some(ValueKind::Blob),
        _ => None,
    }
}

fn int_to_sql(i: i64, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxedSqlError> {
    match *ty {
        Type::INT2 => i16::try_from(i)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(i)?.to_sql(ty, out),
        _ => i.to_sql(ty, out),
    }
}

fn float_to_sql(f: f64, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxedSqlError> {
    if *ty == Type::FLOAT4 {
        #[allow(clippy::cast_possible_truncation)]
        let narrowed = f as f32;
        narrowed.to_sql(ty, out)
    } else {
        f.to_sql(ty, out)
    }
}

fn timestamp_to_sql(
    dt: &NaiveDateTime,
    ty: &Type,
    out: &mut bytes::BytesMut,
) -> Result<IsNull, BoxedSqlError> {
    match *ty {
        Type::TIMESTAMPTZ => dt.and_utc().to_sql(ty, out),
        Type::DATE => dt.date().to_sql(ty, out),
        _ => dt.to_sql(ty, out),
    }
}

impl ToSql for RowValues {
    /// Encode the value for the server-inferred `ty`, converting it first through
    /// the coercion table. Pairs outside the table are rejected, never reinterpreted.
    fn to_sql(&self, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxedSqlError> {
        if self.is_null() {
            return Ok(IsNull::Yes);
        }
        let kind = target_kind(ty)
            .ok_or_else(|| format!("cannot bind {} value as {ty}", self.kind()))?;

        let coerced;
        let value = if self.kind() == kind {
            self
        } else {
            coerced = coerce(self.clone(), kind)?;
            &coerced
        };

        match value {
            RowValues::Int(i) => int_to_sql(*i, ty, out),
            RowValues::Float(f) => float_to_sql(*f, ty, out),
            RowValues::Text(s) => s.to_sql(ty, out),
            RowValues::Bool(b) => b.to_sql(ty, out),
            RowValues::Timestamp(dt) => timestamp_to_sql(dt, ty, out),
            RowValues::Null => Ok(IsNull::Yes),
            RowValues::JSON(value) => value.to_sql(ty, out),
            RowValues::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        target_kind(ty).is_some()
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_narrow_to_column_width() {
        let mut out = bytes::BytesMut::new();
        RowValues::Int(7).to_sql(&Type::INT4, &mut out).unwrap();
        assert_eq!(out.len(), 4);

        let mut out = bytes::BytesMut::new();
        RowValues::Int(7).to_sql(&Type::INT2, &mut out).unwrap();
        assert_eq!(out.len(), 2);

        let mut out = bytes::BytesMut::new();
        assert!(
            RowValues::Int(i64::from(i32::MAX) + 1)
                .to_sql(&Type::INT4, &mut out)
                .is_err()
        );
    }

    #[test]
    fn integral_float_binds_to_bigint_as_integer() {
        let mut out = bytes::BytesMut::new();
        RowValues::Float(7.0)
            .to_sql_checked(&Type::INT8, &mut out)
            .unwrap();
        assert_eq!(&out[..], &7_i64.to_be_bytes());

        let mut out = bytes::BytesMut::new();
        assert!(
            RowValues::Float(7.5)
                .to_sql_checked(&Type::INT8, &mut out)
                .is_err()
        );
    }

    #[test]
    fn integer_binds_to_real_as_float() {
        let mut out = bytes::BytesMut::new();
        RowValues::Int(3)
            .to_sql_checked(&Type::FLOAT4, &mut out)
            .unwrap();
        assert_eq!(&out[..], &3.0_f32.to_be_bytes());

        let mut out = bytes::BytesMut::new();
        RowValues::Int(3)
            .to_sql_checked(&Type::FLOAT8, &mut out)
            .unwrap();
        assert_eq!(&out[..], &3.0_f64.to_be_bytes());
    }

    #[test]
    fn integer_is_rejected_for_timestamp_columns() {
        let mut out = bytes::BytesMut::new();
        assert!(
            RowValues::Int(7)
                .to_sql_checked(&Type::TIMESTAMP, &mut out)
                .is_err()
        );
        assert!(out.is_empty());

        let mut out = bytes::BytesMut::new();
        assert!(
            RowValues::Int(7)
                .to_sql_checked(&Type::TEXT, &mut out)
                .is_err()
        );
    }

    #[test]
    fn text_is_parsed_for_timestamp_columns() {
        let mut out = bytes::BytesMut::new();
        RowValues::Text("2024-01-02 03:04:05".into())
            .to_sql_checked(&Type::TIMESTAMP, &mut out)
            .unwrap();
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn unsupported_server_types_are_not_accepted() {
        assert!(!<RowValues as ToSql>::accepts(&Type::UUID));
        assert!(<RowValues as ToSql>::accepts(&Type::JSONB));
    }

    #[test]
    fn null_binds_as_sql_null() {
        let mut out = bytes::BytesMut::new();
        let is_null = RowValues::Null.to_sql(&Type::TEXT, &mut out).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
    }

    #[test]
    fn params_keep_order() {
        let values = vec![RowValues::Int(1), RowValues::Text("a".into())];
        let params = Params::convert(&values);
        assert_eq!(params.as_refs().len(), 2);
    }
}
