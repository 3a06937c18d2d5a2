//! Console plus log-file tracing setup.
//!
//! Every event goes to stderr in compact form and is appended, timestamped,
//! to `<log_dir>/app.log`. Only record ids and counts are ever logged, never
//! personal fields.

use std::io;

use roster_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::env_filter;

pub const LOG_FILE_NAME: &str = "app.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it until the
/// process exits.
///
/// # Errors
///
/// Fails if the log directory cannot be created.
pub fn init_logging(config: &LoggingConfig) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(io::stderr)
        .with_filter(env_filter(config));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer)
        .with_filter(env_filter(config));

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
