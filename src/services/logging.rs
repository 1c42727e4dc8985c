//! Log output for jobmark.
//!
//! Installs a `tracing-subscriber` formatter writing to stderr; stdout is
//! reserved for the RPC protocol.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `jobmark=debug`.
pub const LOG_ENV: &str = "JOBMARK_LOG";

/// Builds the filter from `JOBMARK_LOG`, falling back to `default_directive`,
/// then to `info` if that does not parse.
pub fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Returns false if one was already set.
pub fn init_logging(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
