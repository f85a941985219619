//! Unified error type for data layer
//!
//! Wraps backend-specific errors (SQLite, MySQL) while preserving which
//! backend produced them.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// MySQL database error
    #[error("MySQL error: {0}")]
    Mysql(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Mysql(_) => "mysql",
            Self::MigrationFailed { backend, .. } => backend,
            Self::Config(_) | Self::Io(_) => "unknown",
        }
    }
}

impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
        }
    }
}

impl From<crate::data::mysql::MysqlError> for DataError {
    fn from(e: crate::data::mysql::MysqlError) -> Self {
        match e {
            crate::data::mysql::MysqlError::Database(e) => Self::Mysql(e),
            crate::data::mysql::MysqlError::Config(msg) => Self::Config(msg),
        }
    }
}
