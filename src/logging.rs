//! Logging setup for the command-line tools.
//!
//! Diagnostics go to stderr through a `tracing-subscriber` fmt layer so they
//! never mix with digests or reports on stdout. The level is chosen by, in
//! order:
//!
//! 1. `RUST_LOG`, when set
//! 2. `--quiet`: errors only
//! 3. `-v` for debug, `-vv` or more for trace
//! 4. otherwise warnings

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level selected by the verbosity flags alone.
pub fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(determine_level(verbose, quiet).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
