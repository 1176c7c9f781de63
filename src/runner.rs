//! Spec runner: invokes `mojo run` and leaves a rerun script behind on
//! failure.
//!
//! A failed spec is an outcome, not an error. Errors are reserved for the
//! wrapper itself (missing config, missing mojo binary, unwritable root).
use crate::cli::DEFAULT_ROOT;
use crate::config::resolve_env_file;
use crate::paths::GoMojoPaths;
use crate::process::{exit_status_string, format_command_line, run_status};
use crate::run_env::{compose, RunEnvironment};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a single spec run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Passed,
    Failed { rerun_file: PathBuf, status: String },
}

/// Compose the run environment and execute the spec once.
pub fn run_spec(
    spec: &str,
    paths: &GoMojoPaths,
    series: &str,
    workspace: &str,
    env_file: &Path,
) -> Result<RunOutcome> {
    let env = compose(spec, paths, series, workspace, env_file)?;
    run_with_env(spec, paths, &env, env_file)
}

/// Execute `mojo run` with `env` layered over the parent environment.
pub fn run_with_env(
    spec: &str,
    paths: &GoMojoPaths,
    env: &RunEnvironment,
    env_file: &Path,
) -> Result<RunOutcome> {
    let rerun_file = env.rerun_file()?;
    let mojo = paths.mojo_exec();
    println!("{}", format_command_line(&mojo, &["run"]));
    let status = run_status(mojo, &["run"], Some(env.vars()))?;
    if status.success() {
        tracing::info!(spec, "mojo run passed");
        return Ok(RunOutcome::Passed);
    }

    let status = exit_status_string(&status);
    tracing::warn!(spec, status = %status, "mojo run failed");
    write_rerun_file(&rerun_file, env)?;
    print!("{}", rerun_message(&rerun_file, env, spec, paths, env_file));
    Ok(RunOutcome::Failed { rerun_file, status })
}

/// Write the rerun script, creating the workspace directory if needed.
pub fn write_rerun_file(rerun_file: &Path, env: &RunEnvironment) -> Result<()> {
    if let Some(parent) = rerun_file.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(rerun_file, env.render_rerun_script().as_bytes())
        .with_context(|| format!("write {}", rerun_file.display()))?;
    tracing::info!(path = %rerun_file.display(), "wrote rerun env");
    Ok(())
}

/// Command that reruns the whole spec against the same root and overrides.
///
/// `--root` and `--config` are only spelled out when they differ from the
/// values the wrapper would pick on its own.
pub fn rerun_command(env: &RunEnvironment, paths: &GoMojoPaths, env_file: &Path) -> String {
    let field = |key: &str| env.get(key).unwrap_or_default().to_string();
    let mut words = vec![
        "go-mojo".to_string(),
        "-p".to_string(),
        "-w".to_string(),
        field("MOJO_WORKSPACE"),
        "-s".to_string(),
        field("MOJO_SERIES"),
    ];
    if paths.root() != Path::new(DEFAULT_ROOT) {
        words.push("--root".to_string());
        words.push(paths.root().display().to_string());
    }
    let default_env_file = resolve_env_file(None).ok();
    if default_env_file.as_deref() != Some(env_file) {
        words.push("--config".to_string());
        words.push(env_file.display().to_string());
    }
    words.push(field("MOJO_STAGE"));
    shell_words::join(words)
}

/// Operator guidance printed after a failed run.
pub fn rerun_message(
    rerun_file: &Path,
    env: &RunEnvironment,
    spec: &str,
    paths: &GoMojoPaths,
    env_file: &Path,
) -> String {
    let rerun_file = rerun_file.display();
    let mut out = String::new();
    let _ = writeln!(out, "\n\nIt looks like your mojo run failed :-( ");
    let _ = writeln!(
        out,
        "\n* To rerun the whole spec using the existing environment:\n"
    );
    let _ = writeln!(out, "    {}", rerun_command(env, paths, env_file));
    let _ = writeln!(
        out,
        "\n\n* To rerun a specific step in the existing environment:\n"
    );
    let _ = writeln!(out, "    source {rerun_file}");
    let _ = writeln!(out, "    cd {}/{spec}", paths.spec_dir().display());
    let _ = writeln!(
        out,
        "\n    Check the manifest file for any options the script might "
    );
    let _ = writeln!(out, "    take and prepend them");
    let _ = writeln!(out, "\n    e.g. if the manifest contains the following line:");
    let _ = writeln!(
        out,
        "\n        verify config=simple_os_checks.py MACHINES='trusty:m1.small:2' CLOUDINIT_WAIT='600'"
    );
    let _ = writeln!(out, "\n    Then run...");
    let _ = writeln!(
        out,
        "\n        MACHINES='trusty:m1.small:2' CLOUDINIT_WAIT='600' ./simple_os_checks.py"
    );
    let _ = writeln!(out, "\n* To use openstack cli for debugging:\n");
    let _ = writeln!(out, "    source {rerun_file}");
    let _ = writeln!(out, "    source {}", paths.novarc_auto().display());
    let _ = writeln!(out, "    openstack whatevs");
    out
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
