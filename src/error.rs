use thiserror::Error;

/// SQLSTATE class reported by the backend for integrity constraint violations.
const CONSTRAINT_VIOLATION_CLASS: &str = "23";

#[derive(Debug, Error)]
pub enum SqlRecordError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] bb8::RunError<tokio_postgres::Error>),

    /// Error reported by the database server, with its SQLSTATE code when known.
    #[error("Database error{}: {message}", code.as_ref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    Database {
        code: Option<String>,
        message: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("No identity field found on record for table {0}")]
    IdentityMissing(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Record not found in {table}")]
    NotFound { table: String },

    #[error("Constraint violation during {operation} on {table} [{code}]: {message}")]
    ConstraintViolation {
        operation: &'static str,
        table: String,
        code: String,
        message: String,
    },

    #[error("No rows affected by {operation} on {table}")]
    NoRowsAffected {
        operation: &'static str,
        table: String,
    },

    #[error("{operation} on {table} failed: {source}")]
    Operation {
        operation: &'static str,
        table: String,
        #[source]
        source: Box<SqlRecordError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

/// Coarse classification of [`SqlRecordError`], stable across context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    TypeMismatch,
    IdentityMissing,
    FieldNotFound,
    NotFound,
    ConstraintViolation,
    NoRowsAffected,
    Configuration,
    Execution,
}

impl SqlRecordError {
    /// Classify the error, looking through `Operation` context wrappers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::IdentityMissing(_) => ErrorKind::IdentityMissing,
            Self::FieldNotFound(_) => ErrorKind::FieldNotFound,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::NoRowsAffected { .. } => ErrorKind::NoRowsAffected,
            Self::ConfigError(_) => ErrorKind::Configuration,
            _ => ErrorKind::Execution,
        }
    }

    /// The innermost error beneath any `Operation` wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &SqlRecordError {
        let mut current = self;
        while let Self::Operation { source, .. } = current {
            current = source;
        }
        current
    }

    /// SQLSTATE code attached to a backend error, if any.
    #[must_use]
    pub fn sql_state(&self) -> Option<&str> {
        match self.root_cause() {
            Self::Database { code, .. } => code.as_deref(),
            Self::ConstraintViolation { code, .. } => Some(code),
            #[cfg(feature = "postgres")]
            Self::PostgresError(e) => e.code().map(tokio_postgres::error::SqlState::code),
            _ => None,
        }
    }

    /// Attach the attempted operation and target table to an error.
    ///
    /// Backend errors in SQLSTATE class 23 become `ConstraintViolation`. Errors that
    /// already carry their operation and table are returned unchanged.
    #[must_use]
    pub fn in_operation(self, operation: &'static str, table: &str) -> SqlRecordError {
        if let Some(code) = self.sql_state()
            && code.starts_with(CONSTRAINT_VIOLATION_CLASS)
        {
            let code = code.to_string();
            let message = match self.root_cause() {
                Self::Database { message, .. } => message.clone(),
                other => other.to_string(),
            };
            return Self::ConstraintViolation {
                operation,
                table: table.to_string(),
                code,
                message,
            };
        }

        match self {
            Self::NotFound { .. }
            | Self::ConstraintViolation { .. }
            | Self::NoRowsAffected { .. }
            | Self::Operation { .. } => self,
            other => Self::Operation {
                operation,
                table: table.to_string(),
                source: Box::new(other),
            },
        }
    }
}
