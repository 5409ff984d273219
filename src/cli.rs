//! Argument handling shared by both binaries.

use std::process::ExitCode;

use clap::{Args, Parser};

/// Exit status for malformed command lines.
pub const EXIT_USAGE: u8 = 1;

/// Exit status when a walk failed.
pub const EXIT_WALK_FAILED: u8 = 2;

/// Verbosity flags common to every tool.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct Verbosity {
    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}

impl Verbosity {
    pub fn init_logging(&self) {
        crate::logging::init_logging(self.verbose, self.quiet);
    }
}

/// Parse the process arguments.
///
/// Help and version requests print to stdout and yield success; every other
/// parse failure prints to stderr and yields [`EXIT_USAGE`].
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    parse_from(std::env::args_os())
}

pub fn parse_from<T, I>(args: I) -> Result<T, ExitCode>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    T::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::from(EXIT_USAGE)
        } else {
            ExitCode::SUCCESS
        }
    })
}
