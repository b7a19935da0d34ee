//! Command line entry point shared by the `check`, `check_http` and
//! `check_port` binaries.

use std::path::{Path, PathBuf};

use checkup::{CheckFile, CheckKind, Report, Runner, UsageError};
use clap::Parser;
use tracing::{debug, info};

/// Run the checks described by a JSON file and print a JSON report.
///
/// Help and version flags are disabled so that stdout only ever carries the
/// JSON report and a path starting with `-` is still read as a file.
#[derive(Debug, Parser)]
#[command(about, disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Path to the JSON file describing the checks
    #[arg(allow_hyphen_values = true)]
    pub path: PathBuf,
}

/// Parse the command line, run the checks and print the report.
///
/// `kind` limits the accepted checks to one variant. Returns the process exit code.
pub async fn execute(kind: Option<CheckKind>) -> i32 {
    logger::init();
    run(kind).await.emit()
}

async fn run(kind: Option<CheckKind>) -> Report {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            debug!(error = %e, "invalid arguments");
            return Report::usage(&UsageError::ArgCount);
        }
    };

    run_file(&args.path, kind).await
}

/// Run the checks from `path` and build the report
pub async fn run_file(path: &Path, kind: Option<CheckKind>) -> Report {
    let file = match load(path, kind) {
        Ok(file) => file,
        Err(e) => return Report::usage(&e),
    };

    info!(path = %path.display(), checks = file.checks.len(), "running checks");
    Runner::from(file).run().await.into()
}

fn load(path: &Path, kind: Option<CheckKind>) -> Result<CheckFile, UsageError> {
    let file = CheckFile::load(path)?;

    match kind {
        Some(kind) => file.restrict(kind),
        None => Ok(file),
    }
}
