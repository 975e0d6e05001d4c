//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! report.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TRSYNC_LOG";

/// Install the global subscriber. `-v` raises this crate to debug unless
/// `TRSYNC_LOG` says otherwise.
pub fn init(verbose: bool) {
    let default = if verbose { "warn,trsync=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
