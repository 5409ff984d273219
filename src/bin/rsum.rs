//! rsum - print the content digest of files and directory trees.
//!
//! Usage:
//!   rsum [PATH]...           Digest each path (defaults to ".")

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};

use treesum::cli::{self, EXIT_WALK_FAILED, Verbosity};
use treesum_core::{WalkConfig, WalkError};
use treesum_walk::ConcurrentWalker;

#[derive(Parser)]
#[command(
    name = "rsum",
    version,
    about = "Print SHA-1 content digests of files and directory trees",
    long_about = "rsum prints one line per path: the hex digest, two spaces and the path.\n\n\
                  A directory digest covers the names and contents of everything below it, \
                  independent of listing order. Symbolic links are never followed."
)]
struct Cli {
    /// Files or directories to digest
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    #[command(flatten)]
    verbosity: Verbosity,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli: Cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(code) => return Ok(code),
    };
    cli.verbosity.init_logging();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;

    Ok(runtime.block_on(run(cli.paths)))
}

async fn run(paths: Vec<PathBuf>) -> ExitCode {
    let walker = ConcurrentWalker::from_config(&WalkConfig::default());

    // Every path is walked at once; results are printed in argument order.
    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let walker = walker.clone();
            let task_path = path.clone();
            (path, tokio::spawn(async move { walker.walk(task_path).await }))
        })
        .collect();

    let mut failed = false;
    for (path, handle) in handles {
        match handle.await.map_err(WalkError::task).and_then(|result| result) {
            Ok(fingerprint) => println!("{fingerprint}  {}", path.display()),
            Err(err) => {
                failed = true;
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_WALK_FAILED)
    } else {
        ExitCode::SUCCESS
    }
}
