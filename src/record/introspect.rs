use indexmap::IndexMap;

use super::Record;
use crate::error::SqlRecordError;

/// Column name to current field value.
///
/// Entries follow field declaration order, but nothing built on top of this map
/// should depend on that order for correctness.
pub type ColumnMap = IndexMap<String, crate::types::RowValues>;

/// Map every exported, non-excluded field of `record` to its column name.
///
/// # Errors
/// Returns `ConfigError` if two fields resolve to the same column name, and
/// `FieldNotFound` if the descriptor names a field the record cannot read.
pub fn derive_columns<R: Record>(record: &R) -> Result<ColumnMap, SqlRecordError> {
    let descriptor = R::descriptor();
    let mut columns = ColumnMap::with_capacity(descriptor.fields.len());

    for field in descriptor.fields.iter().filter(|f| f.is_mapped()) {
        let column = field.column_name();
        let value = record.read_field(field.ident).ok_or_else(|| {
            SqlRecordError::FieldNotFound(format!("{}.{}", descriptor.table, field.ident))
        })?;

        if columns.contains_key(&column) {
            return Err(SqlRecordError::ConfigError(format!(
                "column {column} is mapped by more than one field of {}",
                descriptor.table
            )));
        }
        columns.insert(column, value);
    }

    Ok(columns)
}
