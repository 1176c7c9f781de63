//! `.project` marker that tells mojo a root is initialized for a series.
use crate::paths::{container_root, project_root};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Containers are not used; mojo runs directly against the juju model.
pub const CONTAINER_CLASS: &str = "containerless";

pub const PROJECT_FILE_NAME: &str = ".project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub container_class: String,
    pub container_root: PathBuf,
    pub project_root: PathBuf,
}

impl ProjectConfig {
    pub fn new(mojo_root: &Path, series: &str) -> Self {
        Self {
            container_class: CONTAINER_CLASS.to_string(),
            container_root: container_root(mojo_root, series),
            project_root: project_root(mojo_root),
        }
    }

    /// Path of the marker file inside the container root.
    pub fn marker_path(&self) -> PathBuf {
        self.container_root.join(PROJECT_FILE_NAME)
    }
}

/// Create the per-series container directory and (re)write its marker.
pub fn init_mojo_root(mojo_root: &Path, series: &str) -> Result<ProjectConfig> {
    let config = ProjectConfig::new(mojo_root, series);
    fs::create_dir_all(&config.container_root)
        .with_context(|| format!("create {}", config.container_root.display()))?;
    let marker = config.marker_path();
    let text = serde_json::to_string(&config).context("serialize project config")?;
    fs::write(&marker, text.as_bytes()).with_context(|| format!("write {}", marker.display()))?;
    tracing::info!(path = %marker.display(), series, "initialized mojo root");
    Ok(config)
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
