//! fdup - report files with identical content under a directory.
//!
//! Usage:
//!   fdup [ROOT]              Text report (ROOT defaults to ".")
//!   fdup [ROOT] -f json      Same groups as JSON

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};

use treesum::cli::{self, EXIT_WALK_FAILED, Verbosity};
use treesum_core::{WalkConfig, WalkError};
use treesum_dups::{DuplicateIndex, DuplicateReport, IndexingDigestor};
use treesum_walk::{ConcurrentWalker, Sha1Digestor};

/// Open handles allowed while scanning for duplicates.
const MAX_OPEN_FILES: usize = 10;

#[derive(Parser)]
#[command(
    name = "fdup",
    version,
    about = "Find files with identical content",
    long_about = "fdup digests every regular file below ROOT and lists each group of \
                  files sharing the same content, largest total size first."
)]
struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    verbosity: Verbosity,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
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

    let report = match runtime.block_on(scan(&cli.root)) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}: {err}", cli.root.display());
            return Ok(ExitCode::from(EXIT_WALK_FAILED));
        }
    };

    match cli.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn scan(root: &Path) -> Result<DuplicateReport, WalkError> {
    let config = WalkConfig::new(MAX_OPEN_FILES);
    let index = Arc::new(DuplicateIndex::new());
    let digestor = IndexingDigestor::new(
        Sha1Digestor::with_buffer_size(config.read_buffer_size),
        Arc::clone(&index),
    );

    let fingerprint = ConcurrentWalker::new(digestor, config.max_open_files)
        .walk(root)
        .await?;
    tracing::debug!(%fingerprint, files = index.len(), "scan finished");

    Ok(index.report())
}
