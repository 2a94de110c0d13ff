//! Structured logging
//!
//! Initializes the `tracing` subscriber with a pretty or JSON formatter and
//! `RUST_LOG`-style filtering. Output goes to stderr so that replay output on
//! stdout stays machine-readable.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for local use
    #[default]
    Pretty,
    /// One JSON object per line for log aggregation
    Json,
}

/// Initialize the global tracing subscriber
///
/// Call once, early in `main()`.
///
/// # Arguments
///
/// * `default_level` - Filter used when `RUST_LOG` is unset, e.g. `"info"` or
///   `"wallet_ledger=debug,tower_http=info"`
/// * `format` - Output format
///
/// # Returns
///
/// * `Ok(())` once the subscriber is installed
/// * `Err(String)` if the filter is invalid or a subscriber is already set
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<(), String> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| format!("Invalid log level '{}': {}", default_level, e))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };
    installed.map_err(|e| format!("Failed to initialize logging: {}", e))?;

    tracing::debug!(?format, "logging initialized");
    Ok(())
}
