//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events and `log` records; installing a
//! subscriber is left to the binary. `RUST_LOG` takes precedence over the
//! `-v` count when it is set.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the stderr fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();

    if result.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
