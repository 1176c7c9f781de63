use anyhow::{anyhow, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod cli;
mod config;
mod paths;
mod prereqs;
mod process;
mod project;
mod run_env;
mod runner;
mod workspace;

use crate::cli::RunArgs;
use crate::paths::GoMojoPaths;

/// Exit status for a failed spec run under `--strict`.
const STRICT_FAILURE_EXIT: u8 = 2;

fn main() -> Result<ExitCode> {
    let args = RunArgs::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &RunArgs) -> Result<ExitCode> {
    let series = args
        .series
        .as_deref()
        .map(str::trim)
        .filter(|series| !series.is_empty())
        .ok_or_else(|| anyhow!("--series is required (eg bionic)"))?;

    if !prereqs::check_all() {
        return Err(anyhow!("prerequisite checks failed"));
    }

    let paths = GoMojoPaths::new(args.root.clone());
    bootstrap::init_mojo(
        &paths,
        !args.preserve_venv,
        args.local_spec_dir.as_deref(),
    )?;

    let env_file = config::resolve_env_file(args.config.as_deref())?;
    config::ensure_env_file(&env_file)?;
    project::init_mojo_root(&paths.mojo_root(), series)?;

    let workspace = workspace::resolve_workspace_name(args.workspace_name.as_deref());
    tracing::info!(spec = %args.test_name, series, workspace = %workspace, "running spec");
    let outcome = runner::run_spec(&args.test_name, &paths, series, &workspace, &env_file)?;

    match outcome {
        runner::RunOutcome::Passed => Ok(ExitCode::SUCCESS),
        runner::RunOutcome::Failed { rerun_file, status } => {
            tracing::info!(rerun_file = %rerun_file.display(), status = %status, "spec failed");
            if args.strict {
                return Ok(ExitCode::from(STRICT_FAILURE_EXIT));
            }
            // Interactive use: the guidance above is the failure report.
            Ok(ExitCode::SUCCESS)
        }
    }
}
