//! Startup banner and URL display

use super::config::DatabaseConfig;
use super::constants::APP_NAME;
use crate::core::config::DatabaseBackend;

/// Whether `host` binds every interface
fn is_all_interfaces(host: &str) -> bool {
    host == "0.0.0.0" || host == "::" || host == "[::]"
}

/// Where the catalog lives, without credentials
fn store_location(database: &DatabaseConfig) -> String {
    match (database.backend, &database.mysql) {
        (DatabaseBackend::Sqlite, _) => database.sqlite.path.display().to_string(),
        (DatabaseBackend::Mysql, Some(mysql)) if mysql.url.is_some() => "connection URL".to_string(),
        (DatabaseBackend::Mysql, Some(mysql)) => format!(
            "{}:{}/{}",
            mysql.host, mysql.port, mysql.database
        ),
        (DatabaseBackend::Mysql, None) => "unconfigured".to_string(),
    }
}

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, database: &DatabaseConfig) {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    const W: usize = 10;

    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36mhttp://{}:{}\x1b[0m",
        "Catalog:", display_host, port
    );

    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }

    println!(
        "  \x1b[90m➜  {:<W$} {} ({})\x1b[0m",
        "Store:",
        database.backend,
        store_location(database)
    );

    println!();
}
