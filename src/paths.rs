//! Typed paths into the go-mojo working directory.
//!
//! Centralizing path construction keeps the bootstrapper, composer and
//! runner agreeing on one layout.
use std::path::{Path, PathBuf};

/// Project name used for both the mojo project directory and `MOJO_PROJECT`.
pub const MOJO_PROJECT: &str = "openstack";

/// Convenience wrapper for locating toolchain and spec artifacts.
#[derive(Debug, Clone)]
pub struct GoMojoPaths {
    root: PathBuf,
}

impl GoMojoPaths {
    /// Create a new path helper rooted at the working directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the working directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `mojo/` root handed to mojo as `MOJO_ROOT`.
    pub fn mojo_root(&self) -> PathBuf {
        self.root.join("mojo")
    }

    /// Return the `activate` symlink marking a built venv.
    pub fn venv_activate(&self) -> PathBuf {
        self.root.join("activate")
    }

    /// Return the `charm-test-infra/` checkout path.
    pub fn charm_test_infra_dir(&self) -> PathBuf {
        self.root.join("charm-test-infra")
    }

    /// Return the infra checkout's `tox.ini` path.
    pub fn charm_test_infra_tox(&self) -> PathBuf {
        self.charm_test_infra_dir().join("tox.ini")
    }

    /// Return the infra checkout's `novarc_auto` path.
    pub fn novarc_auto(&self) -> PathBuf {
        self.charm_test_infra_dir().join("novarc_auto")
    }

    /// Return the tox `clients` venv directory.
    pub fn clients_venv_dir(&self) -> PathBuf {
        self.charm_test_infra_dir().join(".tox").join("clients")
    }

    /// Return the venv `bin/` directory prepended to `PATH`.
    pub fn clients_bin_dir(&self) -> PathBuf {
        self.clients_venv_dir().join("bin")
    }

    /// Return the venv's own activation script (symlink target).
    pub fn clients_activate(&self) -> PathBuf {
        self.clients_bin_dir().join("activate")
    }

    /// Return the mojo executable installed into the clients venv.
    pub fn mojo_exec(&self) -> PathBuf {
        self.clients_bin_dir().join("mojo")
    }

    /// Return the `openstack-mojo-specs/` checkout path.
    pub fn spec_dir(&self) -> PathBuf {
        self.root.join("openstack-mojo-specs")
    }
}

/// Project directory under a mojo root.
pub fn project_root(mojo_root: &Path) -> PathBuf {
    mojo_root.join(MOJO_PROJECT)
}

/// Per-series container directory under a mojo root.
pub fn container_root(mojo_root: &Path, series: &str) -> PathBuf {
    project_root(mojo_root).join(series)
}
