//! # Roster Config
//!
//! Configuration types for the student roster, loaded from environment
//! variables with defaults for anything missing or unparseable.
//!
//! - [`database`]: SQLite connection string and data directory
//! - [`logging`]: Log level and log file directory
//! - [`reports`]: At-risk GPA threshold
//!
//! # Example
//!
//! ```ignore
//! use roster_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! let threshold = config.reports.at_risk_threshold();
//! ```

pub mod database;
pub mod logging;
pub mod reports;

// Re-export commonly used types at crate root
pub use database::{DatabaseConfig, StorageConfig};
pub use logging::LoggingConfig;
pub use reports::{ConfigError, DEFAULT_AT_RISK_THRESHOLD, ReportConfig};

/// Every configuration section the roster needs at start-up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub reports: ReportConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let storage = StorageConfig::from_env();
        Self {
            database: DatabaseConfig::from_env(&storage),
            storage,
            logging: LoggingConfig::from_env(),
            reports: ReportConfig::from_env(),
        }
    }
}
