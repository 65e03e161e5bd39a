// src/logging.rs
// =============================================================================
// Logging setup.
//
// Everything goes to stderr so that `--json` output on stdout stays clean.
// RUST_LOG wins when set; otherwise --verbose switches between the two
// built-in filters.
// =============================================================================

use tracing_subscriber::EnvFilter;

const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "info,pdf_link_checker=debug";

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (e.g. from tests) leaves the first subscriber in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
