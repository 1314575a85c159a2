//! Telemetry and tracing configuration.

mod tracing;

use anyhow::Context;

use crate::config::LogFormat;

/// Initializes the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the
/// `RUST_LOG` directives cannot be parsed.
pub(crate) fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    tracing::init_tracing(format).context("Failed to initialize tracing")
}
