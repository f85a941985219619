//! MySQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MysqlError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
