//! Logging setup using `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set. Otherwise `--verbose` selects `debug` for colmap
//! and the default is `warn`. Logs go to stderr so JSON on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .init();
}

/// Filter directive used when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,colmap=debug,colmap_cli=debug"
    } else {
        "warn"
    }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}
