//! Toolchain and specs bootstrap.
//!
//! Both steps overwrite: the venv tree and the specs checkout are removed
//! and rebuilt from scratch, never updated in place. The caller owns the
//! working root exclusively for the duration of a run.
use crate::paths::GoMojoPaths;
use crate::process::{git_clone, run_checked};
use anyhow::{anyhow, Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CHARM_TEST_INFRA_REPO: &str = "https://github.com/openstack-charmers/charm-test-infra.git";
pub const OPENSTACK_MOJO_SPEC_REPO: &str =
    "https://github.com/openstack-charmers/openstack-mojo-specs.git";

/// tox environment that installs mojo and the OpenStack clients.
pub const CLIENTS_TOX_ENV: &str = "clients";

/// Ensure the toolchain venv exists, then refresh the specs checkout.
///
/// The venv is rebuilt when `recreate_venv` is set or when the activation
/// marker is missing.
pub fn init_mojo(
    paths: &GoMojoPaths,
    recreate_venv: bool,
    local_spec_dir: Option<&Path>,
) -> Result<()> {
    if recreate_venv || !paths.venv_activate().exists() {
        rebuild_venv(paths)?;
    } else {
        tracing::info!(root = %paths.root().display(), "preserving existing venv");
    }
    clone_specs(paths, local_spec_dir)
}

/// Wipe the working root and rebuild the tooling venv.
pub fn rebuild_venv(paths: &GoMojoPaths) -> Result<()> {
    remove_dir_if_exists(paths.root())?;
    let infra_dir = paths.charm_test_infra_dir();
    fs::create_dir_all(&infra_dir).with_context(|| format!("create {}", infra_dir.display()))?;
    git_clone(CHARM_TEST_INFRA_REPO, &infra_dir)?;
    let tox_ini = paths.charm_test_infra_tox();
    run_checked(
        "tox",
        &[
            OsStr::new("-c"),
            tox_ini.as_os_str(),
            OsStr::new("-e"),
            OsStr::new(CLIENTS_TOX_ENV),
        ],
    )?;
    link_activate(paths)
}

/// Point the root-level activation marker at the clients venv script.
pub fn link_activate(paths: &GoMojoPaths) -> Result<()> {
    let target = paths.clients_activate();
    let link = paths.venv_activate();
    create_symlink(&target, &link)?;
    tracing::info!(link = %link.display(), target = %target.display(), "linked venv activate");
    Ok(())
}

/// Replace the specs checkout with a fresh clone or a copy of a local tree.
pub fn clone_specs(paths: &GoMojoPaths, local_dir: Option<&Path>) -> Result<()> {
    let spec_dir = paths.spec_dir();
    if let Some(local_dir) = local_dir.filter(|dir| !dir.is_dir()) {
        return Err(anyhow!(
            "local spec dir {} is not a directory",
            local_dir.display()
        ));
    }
    remove_dir_if_exists(&spec_dir)?;
    match local_dir {
        Some(local_dir) => {
            tracing::info!(
                from = %local_dir.display(),
                to = %spec_dir.display(),
                "copying local specs"
            );
            copy_tree(local_dir, &spec_dir)
        }
        None => git_clone(OPENSTACK_MOJO_SPEC_REPO, &spec_dir),
    }
}

/// Recursively copy `src` to `dst`, recreating symlinks rather than
/// following them.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).with_context(|| format!("create {}", dst.display()))?;
    let entries = fs::read_dir(src).with_context(|| format!("read dir {}", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in {}", src.display()))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspect {}", from.display()))?;
        if file_type.is_symlink() {
            let target =
                fs::read_link(&from).with_context(|| format!("read link {}", from.display()))?;
            create_symlink(&target, &to)?;
        } else if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
        }
    }
    Ok(())
}

fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
            .with_context(|| format!("link {} -> {}", link.display(), target.display()))
    }
    #[cfg(not(unix))]
    {
        let _ = target;
        Err(anyhow!(
            "cannot create {}: symlinks are unsupported on this platform",
            link.display()
        ))
    }
}

fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
