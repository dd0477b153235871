//! Embedded PostgreSQL for integration tests.

use postgresql_embedded::PostgreSQL;
use tokio::runtime::Runtime;

use crate::postgres::{ConfigAndPool, PostgresOptions};
use crate::executor::AsyncDatabaseExecutor;

/// A running embedded `PostgreSQL` instance and the options that reach it.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    /// Host, port and credentials of the running server, pointing at the test database
    pub options: PostgresOptions,
    pub database_url: String,
    runtime: Runtime,
}

/// Start an embedded server and create `dbname` in it.
///
/// Blocks on a private runtime, so call it from a plain `#[test]`, not from
/// inside another runtime.
///
/// # Errors
/// Returns an error if the server cannot be set up or started, the database
/// cannot be created, or the post-start connectivity check fails.
pub fn setup_postgres_embedded(dbname: &str) -> Result<EmbeddedPostgres, Box<dyn std::error::Error>> {
    let runtime = Runtime::new()?;
    let (postgresql, options) = runtime.block_on(async {
        let mut postgresql = PostgreSQL::default();
        postgresql.setup().await?;
        postgresql.start().await?;
        postgresql.create_database(dbname).await?;

        let settings = postgresql.settings();
        let options = PostgresOptions {
            host: Some(settings.host.clone()),
            port: settings.port,
            dbname: Some(dbname.to_string()),
            user: Some(settings.username.clone()),
            password: Some(settings.password.clone()),
            pool_max_size: 4,
            ..PostgresOptions::default()
        };

        let config_and_pool = ConfigAndPool::new_postgres(options.clone()).await?;
        let mut conn = config_and_pool.get_connection().await?;
        conn.execute_select("SELECT 1", &[]).await?;
        Ok::<_, Box<dyn std::error::Error>>((postgresql, options))
    })?;

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        options.user.as_deref().unwrap_or_default(),
        options.password.as_deref().unwrap_or_default(),
        options.host.as_deref().unwrap_or_default(),
        options.port,
        dbname
    );
    tracing::info!(port = options.port, "embedded postgres started");

    Ok(EmbeddedPostgres {
        postgresql,
        options,
        database_url,
        runtime,
    })
}

/// Stop a previously started embedded `PostgreSQL` instance.
pub fn stop_postgres_embedded(postgres: EmbeddedPostgres) {
    let EmbeddedPostgres {
        postgresql,
        runtime,
        ..
    } = postgres;
    runtime.block_on(async move {
        if let Err(e) = postgresql.stop().await {
            tracing::warn!(error = %e, "embedded postgres did not stop cleanly");
        }
    });
}
