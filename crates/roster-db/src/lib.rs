//! # Roster DB
//!
//! SQLite connection pool initialization and schema setup.
//!
//! The pool holds a single connection: the roster shares one storage handle
//! for the whole process, and every statement commits immediately.
//!
//! # Example
//!
//! ```ignore
//! use roster_config::{DatabaseConfig, StorageConfig};
//! use roster_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env(&StorageConfig::from_env())).await?;
//!     // Hand the pool to the storage adapter
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use roster_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

// Re-export SqlitePool for convenience
pub use sqlx::SqlitePool;

/// The one table the roster owns.
///
/// The CHECK constraints mirror the level and GPA rules enforced before every
/// write, as a second line of defense.
pub const STUDENTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    student_id   TEXT    PRIMARY KEY NOT NULL,
    full_name    TEXT    NOT NULL,
    programme    TEXT    NOT NULL,
    level        INTEGER NOT NULL CHECK(level IN (100,200,300,400,500,600,700)),
    gpa          REAL    NOT NULL CHECK(gpa >= 0.0 AND gpa <= 4.0),
    email        TEXT    NOT NULL,
    phone_number TEXT    NOT NULL,
    date_added   TEXT    NOT NULL,
    status       TEXT    NOT NULL DEFAULT 'Active'
)
"#;

/// Opens the database described by `config` and makes sure the schema exists.
///
/// The database file is created if missing. Its parent directory must already
/// exist.
///
/// # Errors
///
/// Returns the underlying [`sqlx::Error`] if the URL is malformed, the
/// database cannot be opened, or the schema cannot be created.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    // Never recycle the handle: an in-memory database dies with its connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!(db.url = %config.url, "Database connection opened");

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates the `students` table if it is absent. No other migrations exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(STUDENTS_SCHEMA).execute(pool).await?;
    info!("Database schema verified");
    Ok(())
}
