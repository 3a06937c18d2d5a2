use roster_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the filter shared by every subscriber setup.
///
/// `RUST_LOG` wins when set; otherwise roster crates log at the configured
/// level and `sqlx` is held at warn.
pub(crate) fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "roster={level},roster_cli={level},roster_db={level},sqlx=warn",
            level = config.level
        ))
    })
}

/// Initialize console-only logging when the observability feature is disabled.
///
/// # Configuration
///
/// - **Log Level**: Controlled by `LOG_LEVEL` (default: "info")
/// - **Format**: Compact format with module targets, written to stderr
pub fn init_basic_console_logging(config: &LoggingConfig) {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(config));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
