//! Logging initialization: diagnostics go to stderr so stdout stays clean
//! for command output.
//!
//! Reads the filter from `REPLINE_LOG` (e.g. `debug`, `repline_resolve=debug`).
//! Default: `warn`. `--verbose` forces `debug`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub(crate) const LOG_ENV: &str = "REPLINE_LOG";

pub(crate) fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}
