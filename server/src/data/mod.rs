//! Data storage layer
//!
//! - `filters` - validated search criteria and their compilation to SQL
//! - `sqlite` - embedded catalog store (default)
//! - `mysql` - external catalog store
//! - `traits` - `ProductRepository`, the backend-neutral gateway
//! - `types` - row types shared by all backends
//! - `error` - unified error type for all backends

pub mod error;
pub mod filters;
pub mod mysql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use mysql::MysqlService;
pub use sqlite::SqliteService;
pub use traits::ProductRepository;
pub use types::ProductRow;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

/// Catalog store service
///
/// Wraps the active backend. Services are held in `Arc` so repositories and
/// background tasks can share them.
pub enum CatalogStore {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// MySQL backend (external catalog)
    Mysql(Arc<MysqlService>),
}

impl CatalogStore {
    /// Initialize the store selected by `config.backend`
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(&config.sqlite).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Mysql => {
                let mysql = config.mysql.as_ref().ok_or_else(|| {
                    DataError::Config("MySQL configuration required".to_string())
                })?;
                let service = MysqlService::init(mysql).await?;
                Ok(Self::Mysql(Arc::new(service)))
            }
        }
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Mysql(m) => m.close().await,
        }
    }

    /// Start the background maintenance task
    ///
    /// WAL checkpointing for SQLite, a connectivity ping for MySQL.
    pub fn start_maintenance_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
            Self::Mysql(m) => m.start_health_check_task(shutdown_rx),
        }
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Mysql(_) => DatabaseBackend::Mysql,
        }
    }

    /// Get the repository trait object for catalog reads
    pub fn repository(&self) -> Box<dyn ProductRepository> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Mysql(m) => Box::new(Arc::clone(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SqliteConfig;

    #[tokio::test]
    async fn test_init_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            backend: DatabaseBackend::Sqlite,
            sqlite: SqliteConfig {
                path: dir.path().join("catalog.db"),
            },
            mysql: None,
        };

        let store = CatalogStore::init(&config).await.unwrap();
        assert_eq!(store.backend(), DatabaseBackend::Sqlite);
        assert_eq!(store.repository().get_products_qty().await.unwrap(), 0);

        let (tx, rx) = watch::channel(false);
        let handle = store.start_maintenance_task(rx);
        tx.send(true).unwrap();
        handle.await.unwrap();

        store.close().await;
    }

    #[tokio::test]
    async fn test_mysql_without_settings_is_config_error() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Mysql,
            sqlite: SqliteConfig::default(),
            mysql: None,
        };

        let result = CatalogStore::init(&config).await;
        assert!(matches!(result, Err(DataError::Config(_))));
    }
}
