use tokio::runtime::Handle;

use crate::error::SqlRecordError;

use super::core::{Idle, InTx, PgConnection};

impl PgConnection<Idle> {
    /// Begin an explicit transaction.
    ///
    /// # Errors
    /// Returns `ExecutionError` if starting the transaction fails.
    pub async fn begin(mut self) -> Result<PgConnection<InTx>, SqlRecordError> {
        let conn = self.take_conn()?;
        conn.simple_query("BEGIN").await.map_err(|e| {
            SqlRecordError::ExecutionError(format!("postgres begin error: {e}"))
        })?;
        Ok(PgConnection::new(conn, true))
    }
}

impl PgConnection<InTx> {
    /// Commit and return to idle.
    ///
    /// # Errors
    /// Returns `ExecutionError` if the commit fails.
    pub async fn commit(self) -> Result<PgConnection<Idle>, SqlRecordError> {
        self.finish_tx("COMMIT", "commit").await
    }

    /// Rollback and return to idle.
    ///
    /// # Errors
    /// Returns `ExecutionError` if the rollback fails.
    pub async fn rollback(self) -> Result<PgConnection<Idle>, SqlRecordError> {
        self.finish_tx("ROLLBACK", "rollback").await
    }

    async fn finish_tx(
        mut self,
        sql: &str,
        action: &str,
    ) -> Result<PgConnection<Idle>, SqlRecordError> {
        let conn = self.take_conn()?;
        match conn.simple_query(sql).await {
            Ok(_) => {
                self.needs_rollback = false;
                Ok(PgConnection::new(conn, false))
            }
            Err(e) => {
                // Best-effort rollback; keep needs_rollback so Drop can retry.
                let _ = conn.simple_query("ROLLBACK").await;
                self.conn = Some(conn);
                Err(SqlRecordError::ExecutionError(format!(
                    "postgres {action} error: {e}"
                )))
            }
        }
    }
}

impl<State> Drop for PgConnection<State> {
    fn drop(&mut self) {
        if self.needs_rollback
            && let Some(conn) = self.conn.take()
            && let Ok(handle) = Handle::try_current()
        {
            tracing::warn!("transaction dropped without commit or rollback; rolling back");
            handle.spawn(async move {
                if let Err(e) = conn.simple_query("ROLLBACK").await {
                    tracing::warn!(error = %e, "background rollback failed");
                }
            });
        }
    }
}
