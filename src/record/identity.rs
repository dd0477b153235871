use super::{FieldDef, Record, RecordDescriptor};
use crate::error::SqlRecordError;
use crate::types::RowValues;

const FALLBACK_IDENTITY: &str = "id";

/// Locate the identity field of a record type and its resolved column name.
///
/// A field tagged `primary` wins; more than one is a configuration error. Without
/// one, a field whose identifier is `id` in any case is used, named after its tag
/// or `id` when the tag is absent, empty or `-`.
fn identity_field(
    descriptor: &'static RecordDescriptor,
) -> Result<(&'static FieldDef, String), SqlRecordError> {
    let mut tagged = descriptor
        .fields
        .iter()
        .filter(|f| f.exported && f.column_tag().primary);

    if let Some(field) = tagged.next() {
        if let Some(other) = tagged.next() {
            return Err(SqlRecordError::ConfigError(format!(
                "{} declares more than one primary field ({} and {})",
                descriptor.table, field.ident, other.ident
            )));
        }
        return Ok((field, field.column_name()));
    }

    let field = descriptor
        .fields
        .iter()
        .find(|f| f.exported && f.ident.eq_ignore_ascii_case(FALLBACK_IDENTITY))
        .ok_or_else(|| SqlRecordError::IdentityMissing(descriptor.table.to_string()))?;

    let tag = field.column_tag();
    let column = match tag.name {
        Some(name) if !tag.excluded => name.to_string(),
        _ => FALLBACK_IDENTITY.to_string(),
    };
    Ok((field, column))
}

/// Identity column name of `R`, without needing an instance.
///
/// # Errors
/// Returns `IdentityMissing` when no identity field exists, or `ConfigError` when
/// several fields are tagged `primary`.
pub fn identity_column<R: Record>() -> Result<String, SqlRecordError> {
    identity_field(R::descriptor()).map(|(_, column)| column)
}

/// Identity column name and current value of `record`.
///
/// # Errors
/// Returns `IdentityMissing` when no identity field exists, or `ConfigError` when
/// several fields are tagged `primary`.
pub fn derive_identity<R: Record>(record: &R) -> Result<(String, RowValues), SqlRecordError> {
    let descriptor = R::descriptor();
    let (field, column) = identity_field(descriptor)?;
    let value = record.read_field(field.ident).ok_or_else(|| {
        SqlRecordError::FieldNotFound(format!("{}.{}", descriptor.table, field.ident))
    })?;
    Ok((column, value))
}
