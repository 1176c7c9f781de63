//! User overrides for the mojo run environment (`~/.mojo.yaml`).
//!
//! The file is a flat YAML mapping of variable name to scalar value. A
//! default copy is written on first use; existing files are never rewritten.
use anyhow::{anyhow, Context, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the overrides file in the user's home directory.
pub const MOJO_ENV_FILE_NAME: &str = ".mojo.yaml";

const VIP_BASE: &str = "10.5.0.";
const VIP_FIRST_OCTET: u32 = 230;
const VIP_COUNT: u32 = 21;
const SQUID_PROXY: &str = "http://squid.internal:3128";

/// Default overrides written when no file exists yet.
pub fn default_mojo_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    for index in 0..VIP_COUNT {
        env.insert(
            format!("MOJO_OS_VIP{index:02}"),
            format!("{VIP_BASE}{}", VIP_FIRST_OCTET + index),
        );
    }
    // Kept small: the range feeds certificate subjectAltNames.
    env.insert("CIDR_EXT".to_string(), "10.5.0.0/24".to_string());
    env.insert("MOJO_PROJECT".to_string(), "openstack".to_string());
    env.insert("MOJO_HOME".to_string(), "~/mojo".to_string());
    env.insert("AMULET_HTTP_PROXY".to_string(), SQUID_PROXY.to_string());
    env.insert("AMULET_HTTPS_PROXY".to_string(), SQUID_PROXY.to_string());
    env
}

/// Resolve the overrides file path, preferring an explicit one.
pub fn resolve_env_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(MOJO_ENV_FILE_NAME))
}

/// Write the default overrides if the file does not exist.
///
/// Returns true when a new file was created.
pub fn ensure_env_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    println!("{} not found, creating", path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_yaml::to_string(&default_mojo_env()).context("serialize default mojo env")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default mojo env");
    Ok(true)
}

/// Load the overrides file as a flat name -> value map.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_env_yaml(&text).with_context(|| format!("parse {}", path.display()))
}

/// Parse YAML text into env values; an empty document yields no overrides.
pub fn parse_env_yaml(text: &str) -> Result<BTreeMap<String, String>> {
    let value: Value = serde_yaml::from_str(text).context("parse mojo env yaml")?;
    let mapping = match value {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(anyhow!(
                "mojo env must be a mapping, found {}",
                value_kind(&other)
            ))
        }
    };
    let mut env = BTreeMap::new();
    for (key, value) in mapping {
        let key = scalar_to_string(&key)
            .ok_or_else(|| anyhow!("mojo env key must be a scalar, found {}", value_kind(&key)))?;
        let rendered = scalar_to_string(&value).ok_or_else(|| {
            anyhow!(
                "mojo env value for {key} must be a scalar, found {}",
                value_kind(&value)
            )
        })?;
        env.insert(key, rendered);
    }
    Ok(env)
}

/// Render a YAML 1.2 scalar as an environment value.
///
/// Booleans and null keep the Python spellings (`True`, `False`, `None`).
/// YAML 1.1 spellings such as `yes` or `on` are plain strings here.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null => Some("None".to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
