//! Structured logging bootstrap using `tracing`.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber on stderr, leaving stdout to command output.
///
/// `RUST_LOG` takes precedence over `fallback` (the configured `LOG_FILTER`).
/// A second call is a no-op.
pub fn init_tracing(fallback: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(from_env.as_deref(), fallback)?;

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::debug!(filter = fallback, "tracing initialised");
    Ok(())
}

/// Directives from the environment when set and non-blank, otherwise `fallback`.
pub fn filter_for(from_env: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    match from_env.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {} value `{directives}`", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter `{fallback}`")),
    }
}
