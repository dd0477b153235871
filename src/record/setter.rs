use super::Record;
use crate::error::SqlRecordError;
use crate::types::RowValues;

/// Assign `value` to the field of `record` identified by `logical_name`.
///
/// A field matches when its tag names the column `logical_name`, or, for an
/// untagged field, when its lower-cased identifier equals `logical_name`. The
/// value is converted to the field's declared type through the coercion table.
///
/// # Errors
/// - `FieldNotFound` if no field matches;
/// - `InvalidArgument` if the matching field is not exported;
/// - `TypeMismatch` if the value cannot be converted to the field's type.
pub fn set_field<R: Record>(
    record: &mut R,
    logical_name: &str,
    value: RowValues,
) -> Result<(), SqlRecordError> {
    let descriptor = R::descriptor();

    let field = descriptor
        .fields
        .iter()
        .find(|f| {
            let tag = f.column_tag();
            if tag.excluded {
                return false;
            }
            match tag.name {
                Some(name) => name == logical_name,
                None => f.ident.to_lowercase() == logical_name,
            }
        })
        .ok_or_else(|| {
            SqlRecordError::FieldNotFound(format!("{}.{logical_name}", descriptor.table))
        })?;

    if !field.exported {
        return Err(SqlRecordError::InvalidArgument(format!(
            "field {}.{} cannot be set",
            descriptor.table, field.ident
        )));
    }

    record.write_field(field.ident, value).map_err(|e| match e {
        SqlRecordError::TypeMismatch(detail) => SqlRecordError::TypeMismatch(format!(
            "{}.{}: {detail}",
            descriptor.table, field.ident
        )),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    crate::record! {
        #[table = "events"]
        #[derive(Debug, Default, PartialEq)]
        pub struct Event {
            #[db = "id,primary"]
            pub id: i32,
            #[db = "title"]
            pub title: String,
            pub score: f64,
            pub at: Option<NaiveDateTime>,
            hidden: i64,
        }
    }

    #[test]
    fn sets_by_tag_name_with_integer_narrowing() {
        let mut event = Event::default();
        set_field(&mut event, "id", RowValues::Int(42)).unwrap();
        assert_eq!(event.id, 42);
    }

    #[test]
    fn sets_untagged_field_by_lowercase_identifier() {
        let mut event = Event::default();
        set_field(&mut event, "score", RowValues::Int(7)).unwrap();
        assert!((event.score - 7.0).abs() < f64::EPSILON);

        set_field(&mut event, "at", RowValues::Text("2024-01-02 03:04:05".into())).unwrap();
        assert!(event.at.is_some());
        set_field(&mut event, "at", RowValues::Null).unwrap();
        assert!(event.at.is_none());
    }

    #[test]
    fn identifier_does_not_match_when_tagged() {
        let mut event = Event::default();
        let err = set_field(&mut event, "Title", RowValues::Text("x".into())).unwrap_err();
        assert!(matches!(err, SqlRecordError::FieldNotFound(_)));
    }

    #[test]
    fn inconvertible_value_is_a_type_mismatch() {
        let mut event = Event::default();
        let err = set_field(&mut event, "title", RowValues::Bool(true)).unwrap_err();
        match err {
            SqlRecordError::TypeMismatch(msg) => assert!(msg.starts_with("events.title")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(event.title, "");
    }

    #[test]
    fn private_field_cannot_be_set() {
        let mut event = Event::default();
        let err = set_field(&mut event, "hidden", RowValues::Int(1)).unwrap_err();
        assert!(matches!(err, SqlRecordError::InvalidArgument(_)));
        assert_eq!(event.hidden, 0);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let mut event = Event::default();
        let err = set_field(&mut event, "missing", RowValues::Int(1)).unwrap_err();
        assert!(matches!(err, SqlRecordError::FieldNotFound(_)));
    }
}
