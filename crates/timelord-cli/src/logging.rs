//! Logging bootstrap. Everything goes to stderr; stdout carries only the
//! JSON payload.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "TIMELORD_LOG";

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(verbose: bool) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(fallback))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    tracing::debug!(fallback, "tracing initialised");
    Ok(())
}
