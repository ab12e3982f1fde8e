//! Logger initialization built on tracing-subscriber.
//!
//! The level comes from settings but can be overridden with the standard
//! `RUST_LOG` environment variable. Output goes to stderr in either a
//! human-readable text format or JSON for log shippers.

use tracing_subscriber::EnvFilter;

use crate::config::LoggerConfig;

/// Initializes the global tracing subscriber from logger settings.
///
/// # Errors
/// Returns an error if a global subscriber is already installed or the
/// configured level does not parse into a filter directive.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", config.level, e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match config.format.as_str() {
        "json" => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?,
        _ => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?,
    }

    Ok(())
}
