//! Database and file-storage configuration.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: `students.db` inside
//!   the data directory, e.g. `sqlite://data/students.db`)
//! - `DATA_DIR`: Directory for the database, exports, reports and logs (default: `data`)
//!
//! # Connection String Format
//!
//! ```text
//! sqlite://path/to/students.db
//! sqlite::memory:
//! ```

use std::env;
use std::path::{Path, PathBuf};

pub const DATABASE_FILE_NAME: &str = "students.db";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::for_data_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL`, defaulting to the database file inside the
    /// configured data directory.
    pub fn from_env(storage: &StorageConfig) -> Self {
        env::var("DATABASE_URL")
            .map(|url| Self { url })
            .unwrap_or_else(|_| Self::for_data_dir(storage.data_dir()))
    }

    /// The `students.db` file inside `data_dir`.
    pub fn for_data_dir(data_dir: &Path) -> Self {
        Self {
            url: format!("sqlite://{}", data_dir.join(DATABASE_FILE_NAME).display()),
        }
    }

    /// Path of the database file, or `None` for an in-memory database.
    pub fn file_path(&self) -> Option<PathBuf> {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url);
        let (path, params) = rest.split_once('?').unwrap_or((rest, ""));

        if path.is_empty() || path == ":memory:" || params.contains("mode=memory") {
            return None;
        }
        Some(PathBuf::from(path))
    }

    /// An in-memory database, used by tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
