//! Log subscriber setup for the `ganji` binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, e.g.
/// `RUST_LOG=ganji_search=debug`. Logs go to stderr so `--json` output stays
/// clean.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}
