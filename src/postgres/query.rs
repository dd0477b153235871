use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, Row, Statement};

use super::params::Params;
use crate::error::SqlRecordError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Convert a driver error into `Database` when the server reported it, keeping
/// the SQLSTATE code.
pub(crate) fn map_pg_error(err: tokio_postgres::Error) -> SqlRecordError {
    match err.as_db_error() {
        Some(db) => SqlRecordError::Database {
            code: Some(db.code().code().to_string()),
            message: db.message().to_string(),
        },
        None => SqlRecordError::PostgresError(err),
    }
}

/// Extract cell `idx` of `row` as a `RowValues`.
///
/// # Errors
/// Returns `PostgresError` if the column type cannot be read.
pub fn postgres_extract_value(row: &Row, idx: usize) -> Result<RowValues, SqlRecordError> {
    let ty = row.columns()[idx].type_();

    let value = match *ty {
        Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(idx)?
            .map_or(RowValues::Null, RowValues::Int),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Float(f64::from(v))),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(idx)?
            .map_or(RowValues::Null, RowValues::Float),
        Type::BOOL => row
            .try_get::<_, Option<bool>>(idx)?
            .map_or(RowValues::Null, RowValues::Bool),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map_or(RowValues::Null, RowValues::Timestamp),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Timestamp(v.naive_utc())),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map_or(RowValues::Null, |d| {
                RowValues::Timestamp(d.and_time(chrono::NaiveTime::MIN))
            }),
        Type::JSON | Type::JSONB => row
            .try_get::<_, Option<Value>>(idx)?
            .map_or(RowValues::Null, RowValues::JSON),
        Type::BYTEA => row
            .try_get::<_, Option<Vec<u8>>>(idx)?
            .map_or(RowValues::Null, RowValues::Blob),
        // text, varchar, bpchar, name and anything else readable as a string
        _ => row
            .try_get::<_, Option<String>>(idx)?
            .map_or(RowValues::Null, RowValues::Text),
    };
    Ok(value)
}

/// Build a result set using statement metadata for column names, so an empty
/// result still reports its columns.
///
/// # Errors
/// Returns errors from row value extraction.
pub fn build_result_set(stmt: &Statement, rows: &[Row]) -> Result<ResultSet, SqlRecordError> {
    let column_names: Vec<String> = stmt
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(column_names));

    for row in rows {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(postgres_extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Prepare and run a query on `client`.
///
/// # Errors
/// Returns `Database` for server-side failures and `PostgresError` otherwise.
pub async fn execute_query_on_client(
    client: &Client,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlRecordError> {
    let stmt = client.prepare(query).await.map_err(map_pg_error)?;
    let converted = Params::convert(params);
    let rows = client
        .query(&stmt, converted.as_refs())
        .await
        .map_err(map_pg_error)?;
    build_result_set(&stmt, &rows)
}

/// Run a DML statement on `client` and return the affected row count.
///
/// # Errors
/// Returns `Database` for server-side failures and `PostgresError` otherwise.
pub async fn execute_dml_on_client(
    client: &Client,
    query: &str,
    params: &[RowValues],
) -> Result<usize, SqlRecordError> {
    let converted = Params::convert(params);
    let rows = client
        .execute(query, converted.as_refs())
        .await
        .map_err(map_pg_error)?;
    usize::try_from(rows).map_err(|e| {
        SqlRecordError::ExecutionError(format!("postgres affected rows conversion error: {e}"))
    })
}
