//! Logging bootstrap.
//!
//! Library code only emits `tracing` events; binaries call [`init`] once at
//! startup to install a formatter.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_filter` when
/// the variable is unset or invalid. Safe to call more than once.
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();
}
