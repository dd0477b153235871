use async_trait::async_trait;

use crate::error::SqlRecordError;
use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

/// Anything that can run SQL with `$n` parameters.
///
/// Implemented for pooled PostgreSQL connections in both the idle and the
/// in-transaction state; tests implement it with an in-memory recorder.
#[async_trait]
pub trait AsyncDatabaseExecutor: Send {
    /// Executes a batch of SQL statements. No parameters are supported.
    async fn execute_batch(&mut self, query: &str) -> Result<(), SqlRecordError>;

    /// Executes a single SELECT (or `... RETURNING`) statement and returns the result set.
    async fn execute_select(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlRecordError>;

    /// Executes a single DML statement and returns the number of rows affected.
    async fn execute_dml(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlRecordError>;

    /// First row of a query, or `None` if it returned nothing.
    async fn select_one(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<Option<CustomDbRow>, SqlRecordError> {
        let result_set = self.execute_select(query, params).await?;
        Ok(result_set.results.into_iter().next())
    }
}
