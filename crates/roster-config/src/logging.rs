//! Logging configuration.
//!
//! - `LOG_LEVEL`: Level for roster crates (default: "info")
//! - `LOG_DIR`: Directory holding `app.log` (default: the data directory)

use std::env;
use std::path::PathBuf;

use crate::database::DEFAULT_DATA_DIR;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(data_dir)),
        }
    }
}
