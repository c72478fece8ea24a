#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "FOREMAN_LOG";

/// Diagnostics go to stderr; stdout carries the JSON-RPC stream.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
