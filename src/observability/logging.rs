//! Subscriber setup for binaries and tests that embed the crate.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_level` (e.g. `"warn"` or `"cando_search=debug"`)
/// when `RUST_LOG` is unset or invalid. Returns `false` if a global
/// subscriber was already installed.
pub fn init_logging(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
