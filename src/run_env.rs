//! Run-environment composition for `mojo run`.
//!
//! Sources merge in order, later ones winning: computed paths, the fixed
//! project name, then the user's overrides file.
use crate::config::load_env_file;
use crate::paths::{container_root, GoMojoPaths, MOJO_PROJECT};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const RERUN_FILE_NAME: &str = "rerun_env";

/// Flat variable map handed to the spec runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunEnvironment {
    vars: BTreeMap<String, String>,
}

impl RunEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Insert or replace one variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Merge `other` over this environment.
    pub fn extend(&mut self, other: BTreeMap<String, String>) {
        self.vars.extend(other);
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| anyhow!("run environment is missing {key}"))
    }

    /// Location of the rerun script, derived from the environment itself so
    /// user overrides of the mojo root or project are honoured.
    pub fn rerun_file(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(self.require("MOJO_ROOT")?)
            .join(self.require("MOJO_PROJECT")?)
            .join(self.require("MOJO_SERIES")?)
            .join(self.require("MOJO_WORKSPACE")?)
            .join(RERUN_FILE_NAME))
    }

    /// Shell script exporting every variable, one line each.
    ///
    /// Values are interpolated verbatim; embedded double quotes are not
    /// escaped.
    pub fn render_rerun_script(&self) -> String {
        self.vars
            .iter()
            .map(|(key, value)| format!("export {key}=\"{value}\"\n"))
            .collect()
    }
}

/// Variables computed from the working root, independent of user config.
pub fn computed_env(
    spec: &str,
    paths: &GoMojoPaths,
    series: &str,
    workspace: &str,
    parent_path: &str,
) -> RunEnvironment {
    let mojo_root = paths.mojo_root();
    let local_dir = container_root(&mojo_root, series)
        .join(workspace)
        .join("local");
    let bin_dir = paths.clients_bin_dir().display().to_string();
    let mut env = RunEnvironment::default();
    if parent_path.is_empty() {
        env.set("PATH", bin_dir);
    } else {
        env.set("PATH", format!("{bin_dir}:{parent_path}"));
    }
    env.set("MOJO_ROOT", mojo_root.display().to_string());
    env.set("MOJO_STAGE", spec);
    env.set("MOJO_WORKSPACE", workspace);
    env.set("MOJO_SPEC", paths.spec_dir().display().to_string());
    env.set("MOJO_LOCAL_DIR", local_dir.display().to_string());
    env.set("MOJO_SERIES", series);
    env.set("MOJO_PROJECT", MOJO_PROJECT);
    env
}

/// The caller's `PATH`, which the venv bin dir is prepended to.
///
/// An unset `PATH` yields an empty string. A non UTF-8 one is an error: it
/// cannot round-trip through the map or the rerun file.
pub fn parent_path(value: Option<OsString>) -> Result<String> {
    match value {
        None => Ok(String::new()),
        Some(value) => value
            .into_string()
            .map_err(|value| anyhow!("PATH is not valid UTF-8: {}", value.to_string_lossy())),
    }
}

/// Compose the full run environment.
///
/// Fails if `env_file` does not exist; it is never created here.
pub fn compose(
    spec: &str,
    paths: &GoMojoPaths,
    series: &str,
    workspace: &str,
    env_file: &Path,
) -> Result<RunEnvironment> {
    let parent_path = parent_path(std::env::var_os("PATH"))?;
    let mut env = computed_env(spec, paths, series, workspace, &parent_path);
    if !env_file.exists() {
        println!("{} not found, exiting", env_file.display());
        return Err(anyhow!("mojo env file {} not found", env_file.display()));
    }
    let overrides = load_env_file(env_file)?;
    tracing::debug!(
        computed = env.vars().len(),
        overrides = overrides.len(),
        "composed run environment"
    );
    env.extend(overrides);
    Ok(env)
}

#[cfg(test)]
#[path = "run_env_tests.rs"]
mod tests;
