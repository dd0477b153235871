//! Record-level create/read/update/delete over any [`AsyncDatabaseExecutor`].
//!
//! Every failure is returned with the operation name and table attached; see
//! [`SqlRecordError::in_operation`].

use tracing::debug;

use crate::error::SqlRecordError;
use crate::executor::AsyncDatabaseExecutor;
use crate::query::QueryAndParams;
use crate::query_builder::Statement;
use crate::record::{Record, derive_columns, materialize, set_field};
use crate::types::RowValues;

/// Insert `record`.
///
/// When the identity value is the zero value of its type, the identity column is
/// left out of the INSERT, requested back with `RETURNING`, and written into
/// `record`. A non-zero identity is inserted like any other column. Records
/// without an identity field are inserted as they are.
///
/// # Errors
/// Returns `ConstraintViolation` for integrity failures reported by the database,
/// or the underlying error wrapped with the operation and table.
pub async fn create<E, R>(executor: &mut E, record: &mut R) -> Result<(), SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    const OP: &str = "create";
    let table = R::table_name();
    insert_record(executor, record)
        .await
        .map_err(|e| e.in_operation(OP, table))
}

async fn insert_record<E, R>(executor: &mut E, record: &mut R) -> Result<(), SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    let mut columns = derive_columns(record)?;

    let identity = match record.primary_key() {
        Ok(identity) => Some(identity),
        Err(SqlRecordError::IdentityMissing(_)) => None,
        Err(e) => return Err(e),
    };

    // Only a mapped identity column can be left for the database to fill in.
    let generated = match identity {
        Some((column, value)) if value.is_zero() && columns.contains_key(&column) => {
            columns.shift_remove(&column);
            Some(column)
        }
        _ => None,
    };

    let names: Vec<&str> = columns.keys().map(String::as_str).collect();
    let mut stmt = Statement::new();
    stmt.insert(table, &names, columns.values().cloned());

    let Some(id_column) = generated else {
        let qp = stmt.build();
        debug!(table, sql = %qp.query, "insert");
        executor.execute_dml(&qp.query, &qp.params).await?;
        return Ok(());
    };

    let qp = stmt.returning(&[id_column.as_str()]).build();
    debug!(table, sql = %qp.query, "insert returning identity");
    let row = executor
        .select_one(&qp.query, &qp.params)
        .await?
        .ok_or_else(|| {
            SqlRecordError::ExecutionError(format!("insert into {table} returned no row"))
        })?;
    let value = row
        .get(&id_column)
        .or_else(|| row.get_by_index(0))
        .cloned()
        .unwrap_or(RowValues::Null);
    set_field(record, &id_column, value)
}

/// Load the row of `R` whose identity column equals `id`.
///
/// # Errors
/// Returns `NotFound` when no row matches.
pub async fn find_by_id<E, R>(executor: &mut E, id: impl Into<RowValues>) -> Result<R, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    const OP: &str = "find_by_id";
    let table = R::table_name();

    select_by_id::<E, R>(executor, id.into())
        .await
        .map_err(|e| e.in_operation(OP, table))?
        .ok_or_else(|| SqlRecordError::NotFound {
            table: table.to_string(),
        })
}

async fn select_by_id<E, R>(executor: &mut E, id: RowValues) -> Result<Option<R>, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    let id_column = R::primary_key_column()?;
    let qp = Statement::new()
        .select(&[])
        .from(table)
        .where_(&format!("{id_column} = %s"), [id])
        .build();
    debug!(table, sql = %qp.query, "find by id");
    let result_set = executor.execute_select(&qp.query, &qp.params).await?;
    Ok(materialize::<R>(&result_set)?.into_iter().next())
}

/// Load every row of `R`'s table.
///
/// # Errors
/// Returns the executor or materialization error wrapped with context.
pub async fn find_all<E, R>(executor: &mut E) -> Result<Vec<R>, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    let qp = Statement::new().select(&[]).from(table).build();
    debug!(table, sql = %qp.query, "find all");
    run_select(executor, &qp)
        .await
        .map_err(|e| e.in_operation("find_all", table))
}

/// Run an arbitrary built query and materialize its rows as `R`.
///
/// # Errors
/// Returns the executor or materialization error wrapped with context.
pub async fn find_where<E, R>(
    executor: &mut E,
    query: &QueryAndParams,
) -> Result<Vec<R>, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    debug!(table, sql = %query.query, "find where");
    run_select(executor, query)
        .await
        .map_err(|e| e.in_operation("find_where", table))
}

async fn run_select<E, R>(executor: &mut E, qp: &QueryAndParams) -> Result<Vec<R>, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let result_set = executor.execute_select(&qp.query, &qp.params).await?;
    materialize(&result_set)
}

/// Write every mapped column of `record` except the identity, matching on the
/// identity value.
///
/// # Errors
/// - `InvalidArgument` if the record has no column besides its identity;
/// - `NoRowsAffected` if no row has that identity.
pub async fn update<E, R>(executor: &mut E, record: &R) -> Result<(), SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    const OP: &str = "update";
    let table = R::table_name();

    let affected = update_row(executor, record)
        .await
        .map_err(|e| e.in_operation(OP, table))?;
    expect_affected(affected, OP, table)
}

async fn update_row<E, R>(executor: &mut E, record: &R) -> Result<usize, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    let (id_column, id_value) = record.primary_key()?;
    let mut columns = derive_columns(record)?;
    columns.shift_remove(&id_column);
    if columns.is_empty() {
        return Err(SqlRecordError::InvalidArgument(format!(
            "{table} has no columns to update"
        )));
    }

    let names: Vec<&str> = columns.keys().map(String::as_str).collect();
    let qp = Statement::new()
        .update(table, &names, columns.values().cloned())
        .where_(&format!("{id_column} = %s"), [id_value])
        .build();
    debug!(table, sql = %qp.query, "update");
    executor.execute_dml(&qp.query, &qp.params).await
}

/// Delete the row whose identity matches `record`.
///
/// # Errors
/// Returns `NoRowsAffected` if no row has that identity.
pub async fn delete<E, R>(executor: &mut E, record: &R) -> Result<(), SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    const OP: &str = "delete";
    let table = R::table_name();

    let affected = delete_row(executor, record)
        .await
        .map_err(|e| e.in_operation(OP, table))?;
    expect_affected(affected, OP, table)
}

async fn delete_row<E, R>(executor: &mut E, record: &R) -> Result<usize, SqlRecordError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record,
{
    let table = R::table_name();
    let (id_column, id_value) = record.primary_key()?;
    let qp = Statement::new()
        .delete(table)
        .where_(&format!("{id_column} = %s"), [id_value])
        .build();
    debug!(table, sql = %qp.query, "delete");
    executor.execute_dml(&qp.query, &qp.params).await
}

fn expect_affected(
    affected: usize,
    operation: &'static str,
    table: &str,
) -> Result<(), SqlRecordError> {
    if affected == 0 {
        return Err(SqlRecordError::NoRowsAffected {
            operation,
            table: table.to_string(),
        });
    }
    Ok(())
}
