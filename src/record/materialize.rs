use super::{FieldDef, Record};
use crate::error::SqlRecordError;
use crate::results::{CustomDbRow, ResultSet};

/// Per-query binding of result columns to record fields; `None` discards the cell.
struct MatchPlan {
    targets: Vec<Option<&'static str>>,
}

impl MatchPlan {
    fn for_columns<R: Record>(columns: &[String]) -> Self {
        let fields = R::descriptor().fields;
        let targets = columns
            .iter()
            .map(|column| {
                fields
                    .iter()
                    .find(|f| f.exported && matches_column(f, column))
                    .map(|f| f.ident)
            })
            .collect();
        Self { targets }
    }

    fn apply<R: Record>(&self, row: &CustomDbRow) -> Result<R, SqlRecordError> {
        let mut record = R::default();
        for (idx, target) in self.targets.iter().enumerate() {
            let Some(ident) = target else {
                continue;
            };
            let Some(value) = row.get_by_index(idx) else {
                continue;
            };
            record.write_field(ident, value.clone()).map_err(|e| match e {
                SqlRecordError::TypeMismatch(detail) => SqlRecordError::TypeMismatch(format!(
                    "scanning column {} into {}.{ident}: {detail}",
                    row.column_names.get(idx).map_or("?", String::as_str),
                    R::table_name()
                )),
                other => other,
            })?;
        }
        Ok(record)
    }
}

fn matches_column(field: &FieldDef, column: &str) -> bool {
    field.ident.eq_ignore_ascii_case(column)
        || field
            .column_tag()
            .name
            .is_some_and(|name| name.eq_ignore_ascii_case(column))
}

/// Build one record per row of `result_set`.
///
/// # Errors
/// Returns `ExecutionError` if rows are present without column metadata, or
/// `TypeMismatch` if a cell cannot be converted into its field.
pub fn materialize<R: Record>(result_set: &ResultSet) -> Result<Vec<R>, SqlRecordError> {
    let mut records = Vec::with_capacity(result_set.results.len());
    materialize_into(&mut records, result_set)?;
    Ok(records)
}

/// Append one record per row of `result_set` to `dest`.
///
/// Cells whose column matches no exported field (by identifier or tag name,
/// ignoring case) are dropped. A field tagged `-` is left out of statements but
/// still receives a column that carries its identifier. On error, records
/// appended before the failing row stay in `dest`.
///
/// # Errors
/// Returns `ExecutionError` if rows are present without column metadata, or
/// `TypeMismatch` if a cell cannot be converted into its field.
pub fn materialize_into<R: Record>(
    dest: &mut Vec<R>,
    result_set: &ResultSet,
) -> Result<(), SqlRecordError> {
    if result_set.results.is_empty() {
        return Ok(());
    }
    let columns = result_set.get_column_names().ok_or_else(|| {
        SqlRecordError::ExecutionError("No column names available".to_string())
    })?;

    let plan = MatchPlan::for_columns::<R>(columns);
    for row in &result_set.results {
        dest.push(plan.apply(row)?);
    }
    Ok(())
}

/// Build a record from a single row.
///
/// # Errors
/// Returns `TypeMismatch` if a cell cannot be converted into its field.
pub fn materialize_row<R: Record>(row: &CustomDbRow) -> Result<R, SqlRecordError> {
    MatchPlan::for_columns::<R>(&row.column_names).apply(row)
}
