//! Logging setup.
//!
//! Logs go to stderr only; stdout carries the version report and prompts.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level used when neither flags nor `RUST_LOG` say otherwise
pub const DEFAULT_LEVEL: &str = "warn";

/// Build an `EnvFilter` based on CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > RUST_LOG env > default_level
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    if verbose > 0 {
        let level = match verbose {
            1 => "debug",
            _ => "trace",
        };
        return EnvFilter::new(level);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global stderr subscriber.
///
/// Calling it twice is harmless; the second call leaves the first subscriber in place.
pub fn init(quiet: bool, verbose: u8) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(quiet, verbose, DEFAULT_LEVEL))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
