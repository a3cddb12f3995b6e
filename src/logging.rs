//! Structured logging setup using tracing.
//!
//! Logs go to stderr so stdout stays reserved for command output. The level
//! comes from the `-v` count unless `RUST_LOG` is set.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps a `-v` count to a log level.
///
/// No flag logs warnings and errors only; each `-v` adds a level.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initializes the global subscriber.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_logging(verbose: u8) {
    let level = level_for_verbosity(verbose);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdexport={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
