//! PostgreSQL backend: configuration, parameter binding, result extraction and
//! pooled typestate connections.
//!
//! - config: connection options and pool setup
//! - params: `RowValues` to wire parameters
//! - query: result extraction and error mapping
//! - typed: `PgConnection<Idle>` / `PgConnection<InTx>`

pub mod config;
pub mod params;
pub mod query;
pub mod typed;

pub use config::{ConfigAndPool, PostgresOptions};
pub use params::Params;
pub use query::build_result_set;
pub use typed::{Idle, InTx, PgConnection, PgManager};

/// Pool of PostgreSQL clients.
pub type PgPool = bb8::Pool<PgManager>;
