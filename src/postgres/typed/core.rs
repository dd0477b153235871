use std::{future::Future, marker::PhantomData, time::Duration};

use bb8::{ManageConnection, Pool, PooledConnection};
use tokio_postgres::{Client, NoTls};

use crate::error::SqlRecordError;

/// Marker types for typestate
pub enum Idle {}
pub enum InTx {}

/// bb8 manager for Postgres clients.
pub struct PgManager {
    pub(crate) config: tokio_postgres::Config,
}

impl PgManager {
    #[must_use]
    pub fn new(config: tokio_postgres::Config) -> Self {
        Self { config }
    }

    /// Build a pool from this manager.
    ///
    /// # Errors
    /// Returns `ConnectionError` if pool creation fails.
    pub async fn build_pool(
        self,
        max_size: u32,
        connection_timeout: Duration,
    ) -> Result<Pool<PgManager>, SqlRecordError> {
        Pool::builder()
            .max_size(max_size)
            .connection_timeout(connection_timeout)
            .build(self)
            .await
            .map_err(|e| SqlRecordError::ConnectionError(format!("postgres pool error: {e}")))
    }
}

impl ManageConnection for PgManager {
    type Connection = Client;
    type Error = tokio_postgres::Error;

    #[allow(clippy::manual_async_fn)]
    fn connect(&self) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send {
        let cfg = self.config.clone();
        async move {
            tracing::debug!(
                hosts = ?cfg.get_hosts(),
                dbname = ?cfg.get_dbname(),
                user = ?cfg.get_user(),
                "postgres connect start"
            );
            let (client, connection) = cfg.connect(NoTls).await?;
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::warn!(error = %e, "postgres connection closed with error");
                }
            });
            Ok(client)
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn is_valid(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move { conn.simple_query("SELECT 1").await.map(|_| ()) }
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        conn.is_closed()
    }
}

/// Typestate wrapper around a pooled Postgres client.
pub struct PgConnection<State> {
    pub(crate) conn: Option<PooledConnection<'static, PgManager>>,
    /// True when a transaction is in-flight and needs rollback if dropped.
    pub(crate) needs_rollback: bool,
    pub(crate) _state: PhantomData<State>,
}

impl PgConnection<Idle> {
    /// Checkout a connection from the pool.
    ///
    /// # Errors
    /// Returns `ConnectionError` if acquiring the connection fails.
    pub async fn from_pool(pool: &Pool<PgManager>) -> Result<Self, SqlRecordError> {
        let conn = pool.get_owned().await.map_err(|e| {
            SqlRecordError::ConnectionError(format!("postgres checkout error: {e}"))
        })?;
        Ok(Self::new(conn, false))
    }
}

impl<State> PgConnection<State> {
    pub(crate) fn new(conn: PooledConnection<'static, PgManager>, needs_rollback: bool) -> Self {
        Self {
            conn: Some(conn),
            needs_rollback,
            _state: PhantomData,
        }
    }

    pub(crate) fn client(&mut self) -> Result<&mut PooledConnection<'static, PgManager>, SqlRecordError> {
        self.conn.as_mut().ok_or_else(|| {
            SqlRecordError::ExecutionError("postgres connection already taken".into())
        })
    }

    pub(crate) fn take_conn(
        &mut self,
    ) -> Result<PooledConnection<'static, PgManager>, SqlRecordError> {
        self.conn.take().ok_or_else(|| {
            SqlRecordError::ExecutionError("postgres connection already taken".into())
        })
    }
}
