//! Blocking subprocess helpers.
//!
//! Every child inherits stdio so the operator sees git, tox and mojo output
//! as it happens.
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Render a command line for logs.
pub fn format_command_line<P: AsRef<OsStr>, S: AsRef<OsStr>>(program: P, args: &[S]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(program.as_ref().to_string_lossy().into_owned());
    words.extend(
        args.iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
    );
    shell_words::join(words)
}

/// Run a command to completion and return its exit status.
///
/// `env` is layered over the parent environment; the parent process's own
/// environment is left untouched.
pub fn run_status<P: AsRef<OsStr>, S: AsRef<OsStr>>(
    program: P,
    args: &[S],
    env: Option<&BTreeMap<String, String>>,
) -> Result<ExitStatus> {
    let command_line = format_command_line(&program, args);
    tracing::info!(command = %command_line, "spawn");
    let mut command = Command::new(program.as_ref());
    command.args(args);
    if let Some(env) = env {
        command.envs(env);
    }
    let status = command
        .status()
        .with_context(|| format!("spawn {command_line}"))?;
    tracing::debug!(command = %command_line, code = ?status.code(), "exited");
    Ok(status)
}

/// Run a command and fail unless it exits successfully.
pub fn run_checked<P: AsRef<OsStr>, S: AsRef<OsStr>>(program: P, args: &[S]) -> Result<()> {
    let command_line = format_command_line(&program, args);
    let status = run_status(program, args, None)?;
    if !status.success() {
        return Err(anyhow!(
            "command failed with status {}: {command_line}",
            exit_status_string(&status)
        ));
    }
    Ok(())
}

/// `git clone <url> <dest>`.
pub fn git_clone(url: &str, dest: &Path) -> Result<()> {
    let dest = dest.as_os_str();
    run_checked(OsStr::new("git"), &[OsStr::new("clone"), OsStr::new(url), dest])
}

pub fn exit_status_string(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
