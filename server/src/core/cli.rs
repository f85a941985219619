use clap::Parser;

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_DATABASE_BACKEND, ENV_DB_CHARSET, ENV_DB_DATABASE, ENV_DB_HOST,
    ENV_DB_PASSWORD, ENV_DB_PORT, ENV_DB_USERNAME, ENV_HOST, ENV_MYSQL_URL, ENV_PORT,
    ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(version, about = "Product catalog server", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    // Database options
    /// Catalog database backend (sqlite or mysql)
    #[arg(long, env = ENV_DATABASE_BACKEND, value_parser = parse_database_backend)]
    pub database_backend: Option<DatabaseBackend>,

    /// SQLite database file (when using sqlite backend)
    #[arg(long, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<PathBuf>,

    /// MySQL connection URL; takes precedence over the discrete DB_* settings
    #[arg(long, env = ENV_MYSQL_URL)]
    pub mysql_url: Option<String>,

    /// MySQL host
    #[arg(long, env = ENV_DB_HOST)]
    pub db_host: Option<String>,

    /// MySQL port
    #[arg(long, env = ENV_DB_PORT)]
    pub db_port: Option<u16>,

    /// MySQL user
    #[arg(long, env = ENV_DB_USERNAME)]
    pub db_username: Option<String>,

    /// MySQL password
    #[arg(long, env = ENV_DB_PASSWORD, hide_env_values = true)]
    pub db_password: Option<String>,

    /// MySQL database name
    #[arg(long, env = ENV_DB_DATABASE)]
    pub db_database: Option<String>,

    /// MySQL connection charset
    #[arg(long, env = ENV_DB_CHARSET)]
    pub db_charset: Option<String>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "mysql" | "mariadb" => Ok(DatabaseBackend::Mysql),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, mysql",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub database_backend: Option<DatabaseBackend>,
    pub sqlite_path: Option<PathBuf>,
    pub mysql_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_database: Option<String>,
    pub db_charset: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            database_backend: cli.database_backend,
            sqlite_path: cli.sqlite_path,
            mysql_url: cli.mysql_url,
            db_host: cli.db_host,
            db_port: cli.db_port,
            db_username: cli.db_username,
            db_password: cli.db_password,
            db_database: cli.db_database,
            db_charset: cli.db_charset,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_backend() {
        assert_eq!(parse_database_backend("sqlite"), Ok(DatabaseBackend::Sqlite));
        assert_eq!(parse_database_backend("MySQL"), Ok(DatabaseBackend::Mysql));
        assert_eq!(parse_database_backend("mariadb"), Ok(DatabaseBackend::Mysql));
        assert!(parse_database_backend("postgres").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "catalog",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--database-backend",
            "mysql",
            "--db-host",
            "db.internal",
            "--db-database",
            "shop",
        ])
        .unwrap();
        let config = CliConfig::from(cli);

        assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.database_backend, Some(DatabaseBackend::Mysql));
        assert_eq!(config.db_host.as_deref(), Some("db.internal"));
        assert_eq!(config.db_database.as_deref(), Some("shop"));
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        let result = Cli::try_parse_from(["catalog", "--database-backend", "oracle"]);
        assert!(result.is_err());
    }
}
