//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging. The Lambda host
//! forwards stdout to its log aggregator and stamps each line with the
//! ingestion time, so timestamps and ANSI colours are left out.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default level directive when `RUST_LOG` is not set.
/// * `json_format` - If true, outputs structured JSON logs; otherwise plain text.
pub fn init(level: &str, json_format: bool) {
    // Build the filter, respecting RUST_LOG if set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        // JSON format for the log aggregator
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .without_time(),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` section of the configuration.
pub fn init_from_config(config: &podcast_resizer_core::Config) {
    init(&config.logging.level, config.logging.format == "json");
}
