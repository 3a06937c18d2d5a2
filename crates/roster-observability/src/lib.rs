//! Roster Observability Module
//!
//! Provides:
//! - Console and log-file tracing setup
//! - Event counters for record changes and imports, kept by an in-process
//!   Prometheus recorder
//!
//! File logging and counters can be disabled at compile time via the
//! `observability` feature flag; console logging is always available.
//!
//! # Examples
//!
//! ```no_run
//! use roster_config::LoggingConfig;
//! use roster_observability::init_logging;
//!
//! let _guard = init_logging(&LoggingConfig::from_env());
//! tracing::info!("Application started");
//! ```

mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use self::logging::{LOG_FILE_NAME, init_logging};
#[cfg(feature = "observability")]
pub use self::metrics::{
    MetricsHandle, init_metrics, track_import_completed, track_record_added, track_record_deleted,
    track_record_updated,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use roster_config::LoggingConfig;

    /// Falls back to console logging; there is no file guard to hold.
    pub fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
        super::init_basic_console_logging(config);
        Ok(())
    }

    /// Stands in for the recorder handle; renders nothing.
    #[derive(Clone)]
    pub struct MetricsHandle;

    impl MetricsHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn init_metrics() -> Option<MetricsHandle> {
        None
    }

    pub fn track_record_added() {}
    pub fn track_record_updated() {}
    pub fn track_record_deleted() {}
    pub fn track_import_completed(_accepted: usize, _rejected: usize) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
