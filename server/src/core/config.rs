use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS,
    MYSQL_DEFAULT_HOST, MYSQL_DEFAULT_IDLE_TIMEOUT_SECS, MYSQL_DEFAULT_MAX_CONNECTIONS,
    MYSQL_DEFAULT_MAX_LIFETIME_SECS, MYSQL_DEFAULT_MIN_CONNECTIONS, MYSQL_DEFAULT_PORT,
    SQLITE_DEFAULT_PATH,
};

// =============================================================================
// Database Backend Enum (SQLite or MySQL)
// =============================================================================

/// Catalog database backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Sqlite,
    Mysql,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Mysql => write!(f, "mysql"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// SQLite configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteFileConfig {
    /// Database file path (default: catalog.db)
    pub path: Option<PathBuf>,
}

/// MySQL configuration section
///
/// Either `url` or the discrete connection settings; `url` wins when both are set.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MysqlFileConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub charset: Option<String>,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep open (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
}

/// Database configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Backend: sqlite (default) or mysql
    pub backend: Option<DatabaseBackend>,
    pub sqlite: Option<SqliteFileConfig>,
    pub mysql: Option<MysqlFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(database) = other.database {
            let current = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default);
            if database.backend.is_some() {
                tracing::trace!(backend = ?database.backend, "Merging database.backend");
                current.backend = database.backend;
            }
            if let Some(sqlite) = database.sqlite {
                let current_sqlite = current
                    .sqlite
                    .get_or_insert_with(SqliteFileConfig::default);
                if sqlite.path.is_some() {
                    tracing::trace!(path = ?sqlite.path, "Merging database.sqlite.path");
                    current_sqlite.path = sqlite.path;
                }
            }
            if let Some(mysql) = database.mysql {
                current
                    .mysql
                    .get_or_insert_with(MysqlFileConfig::default)
                    .merge(mysql);
            }
        }
    }
}

impl MysqlFileConfig {
    fn merge(&mut self, other: MysqlFileConfig) {
        if other.url.is_some() {
            tracing::trace!(url = "***", "Merging database.mysql.url");
            self.url = other.url;
        }
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.user.is_some() {
            tracing::trace!(user = "***", "Merging database.mysql.user");
            self.user = other.user;
        }
        if other.password.is_some() {
            tracing::trace!(password = "***", "Merging database.mysql.password");
            self.password = other.password;
        }
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.charset.is_some() {
            self.charset = other.charset;
        }
        if other.max_connections.is_some() {
            self.max_connections = other.max_connections;
        }
        if other.min_connections.is_some() {
            self.min_connections = other.min_connections;
        }
        if other.acquire_timeout_secs.is_some() {
            self.acquire_timeout_secs = other.acquire_timeout_secs;
        }
        if other.idle_timeout_secs.is_some() {
            self.idle_timeout_secs = other.idle_timeout_secs;
        }
        if other.max_lifetime_secs.is_some() {
            self.max_lifetime_secs = other.max_lifetime_secs;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// SQLite configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub path: PathBuf,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SQLITE_DEFAULT_PATH),
        }
    }
}

/// MySQL configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct MysqlConfig {
    /// Full connection URL; overrides the discrete settings below
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub charset: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: MYSQL_DEFAULT_HOST.to_string(),
            port: MYSQL_DEFAULT_PORT,
            user: String::new(),
            password: None,
            database: String::new(),
            charset: None,
            max_connections: MYSQL_DEFAULT_MAX_CONNECTIONS,
            min_connections: MYSQL_DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: MYSQL_DEFAULT_IDLE_TIMEOUT_SECS,
            max_lifetime_secs: MYSQL_DEFAULT_MAX_LIFETIME_SECS,
        }
    }
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub sqlite: SqliteConfig,
    /// Only populated when backend = mysql
    pub mysql: Option<MysqlConfig>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let mut file_config = FileConfig::default();

        let config_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = config_path {
            let loaded = FileConfig::load_from_file(&path)?;
            loaded.warn_unknown_fields();
            file_config.merge(loaded);
        }

        Self::from_layers(cli, file_config)
    }

    /// Layer defaults, file values and CLI/env overrides
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let backend = cli
            .database_backend
            .or(file_database.backend)
            .unwrap_or_default();

        let sqlite = SqliteConfig {
            path: cli
                .sqlite_path
                .clone()
                .or(file_database.sqlite.and_then(|s| s.path))
                .unwrap_or_else(|| PathBuf::from(SQLITE_DEFAULT_PATH)),
        };

        let mysql = if backend == DatabaseBackend::Mysql {
            let file_mysql = file_database.mysql.unwrap_or_default();
            let defaults = MysqlConfig::default();
            Some(MysqlConfig {
                url: cli.mysql_url.clone().or(file_mysql.url),
                host: cli
                    .db_host
                    .clone()
                    .or(file_mysql.host)
                    .unwrap_or(defaults.host),
                port: cli.db_port.or(file_mysql.port).unwrap_or(defaults.port),
                user: cli
                    .db_username
                    .clone()
                    .or(file_mysql.user)
                    .unwrap_or_default(),
                password: cli.db_password.clone().or(file_mysql.password),
                database: cli
                    .db_database
                    .clone()
                    .or(file_mysql.database)
                    .unwrap_or_default(),
                charset: cli.db_charset.clone().or(file_mysql.charset),
                max_connections: file_mysql
                    .max_connections
                    .unwrap_or(defaults.max_connections),
                min_connections: file_mysql
                    .min_connections
                    .unwrap_or(defaults.min_connections),
                acquire_timeout_secs: file_mysql
                    .acquire_timeout_secs
                    .unwrap_or(defaults.acquire_timeout_secs),
                idle_timeout_secs: file_mysql
                    .idle_timeout_secs
                    .unwrap_or(defaults.idle_timeout_secs),
                max_lifetime_secs: file_mysql
                    .max_lifetime_secs
                    .unwrap_or(defaults.max_lifetime_secs),
            })
        } else {
            None
        };

        let config = Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                backend,
                sqlite,
                mysql,
            },
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.database.backend,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.database.backend == DatabaseBackend::Sqlite
            && self.database.sqlite.path.as_os_str().is_empty()
        {
            anyhow::bail!("Configuration error: database.sqlite.path must not be empty");
        }

        if let Some(mysql) = &self.database.mysql {
            let has_url = mysql.url.as_deref().is_some_and(|u| !u.is_empty());
            if !has_url && mysql.database.is_empty() {
                anyhow::bail!(
                    "Configuration error: database.mysql.url or database.mysql.database \
                     (DB_DATABASE) is required when database.backend is 'mysql'"
                );
            }
        }

        Ok(())
    }
}
