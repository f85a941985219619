// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Catalog";

/// Application name in lowercase (for log targets and identifiers)
pub const APP_NAME_LOWER: &str = "catalog";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "catalog.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CATALOG_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "CATALOG_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "CATALOG_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "CATALOG_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8002;

// =============================================================================
// Catalog Presentation
// =============================================================================

/// Products shown on one page of the paginated listing
pub const PRODUCTS_PER_PAGE: u32 = 2;

/// Maximum accepted length (in characters) of a search field value
pub const FILTER_MAX_LENGTH: usize = 255;

/// Largest integer a page number or product id may take (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the catalog backend (sqlite or mysql)
pub const ENV_DATABASE_BACKEND: &str = "CATALOG_DATABASE_BACKEND";

/// Environment variable for the SQLite database file
pub const ENV_SQLITE_PATH: &str = "CATALOG_SQLITE_PATH";

/// Environment variable for a full MySQL connection URL
pub const ENV_MYSQL_URL: &str = "CATALOG_MYSQL_URL";

/// Discrete MySQL connection settings, used when no URL is given
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_DATABASE: &str = "DB_DATABASE";
pub const ENV_DB_CHARSET: &str = "DB_CHARSET";

// =============================================================================
// SQLite
// =============================================================================

/// Default SQLite database file (relative to the working directory)
pub const SQLITE_DEFAULT_PATH: &str = "catalog.db";

/// Maximum SQLite pool connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// Pages written before SQLite checkpoints the WAL on its own
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval between explicit WAL checkpoints in seconds
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// MySQL
// =============================================================================

/// Default MySQL host
pub const MYSQL_DEFAULT_HOST: &str = "localhost";

/// Default MySQL port
pub const MYSQL_DEFAULT_PORT: u16 = 3306;

/// Default maximum pool connections
pub const MYSQL_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connections kept open
pub const MYSQL_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connection acquire timeout in seconds
pub const MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout in seconds
pub const MYSQL_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default maximum connection lifetime in seconds
pub const MYSQL_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Interval between connectivity pings in seconds
pub const MYSQL_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
