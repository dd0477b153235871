//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::error::{ErrorKind, SqlRecordError};
pub use crate::executor::AsyncDatabaseExecutor;
pub use crate::query::QueryAndParams;
pub use crate::query_builder::Statement;
pub use crate::record::{
    ColumnMap, Record, derive_columns, derive_identity, identity_column, materialize,
    materialize_into, materialize_row, set_field,
};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::types::{FieldValue, RowValues, ValueKind};

#[cfg(feature = "postgres")]
pub use crate::orm::{Orm, Transaction};
#[cfg(feature = "postgres")]
pub use crate::postgres::{ConfigAndPool, PgConnection, PostgresOptions};
