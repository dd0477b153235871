use async_trait::async_trait;

use super::core::{Idle, InTx, PgConnection};
use crate::error::SqlRecordError;
use crate::executor::AsyncDatabaseExecutor;
use crate::postgres::query::{execute_dml_on_client, execute_query_on_client, map_pg_error};
use crate::results::ResultSet;
use crate::types::RowValues;

#[async_trait]
impl AsyncDatabaseExecutor for PgConnection<Idle> {
    /// Auto-commit batch (BEGIN/COMMIT around it).
    async fn execute_batch(&mut self, query: &str) -> Result<(), SqlRecordError> {
        let client = self.client()?;
        let tx = client.transaction().await.map_err(map_pg_error)?;
        tx.batch_execute(query).await.map_err(map_pg_error)?;
        tx.commit().await.map_err(map_pg_error)
    }

    async fn execute_select(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlRecordError> {
        execute_query_on_client(self.client()?, query, params).await
    }

    async fn execute_dml(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlRecordError> {
        execute_dml_on_client(self.client()?, query, params).await
    }
}

#[async_trait]
impl AsyncDatabaseExecutor for PgConnection<InTx> {
    /// Execute batch inside the open transaction.
    async fn execute_batch(&mut self, query: &str) -> Result<(), SqlRecordError> {
        self.client()?
            .batch_execute(query)
            .await
            .map_err(map_pg_error)
    }

    async fn execute_select(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlRecordError> {
        execute_query_on_client(self.client()?, query, params).await
    }

    async fn execute_dml(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlRecordError> {
        execute_dml_on_client(self.client()?, query, params).await
    }
}
