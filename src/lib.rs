//! Struct-to-row mapping for PostgreSQL.
//!
//! Declare a record with [`record!`], build statements with [`Statement`], and
//! run create/read/update/delete through [`crud`] on any
//! [`AsyncDatabaseExecutor`], or through the pooled [`Orm`] facade.

pub mod crud;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod query;
pub mod query_builder;
pub mod record;
pub mod results;
pub mod types;

#[cfg(feature = "postgres")]
pub mod orm;
#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "test-utils-postgres")]
pub mod test_utils;

pub use error::{ErrorKind, SqlRecordError};
pub use executor::AsyncDatabaseExecutor;
pub use query::QueryAndParams;
pub use query_builder::Statement;
pub use record::Record;
pub use results::{CustomDbRow, ResultSet};
pub use types::RowValues;

#[cfg(feature = "postgres")]
pub use orm::{Orm, Transaction};
#[cfg(feature = "postgres")]
pub use postgres::{ConfigAndPool, PostgresOptions};
