//! Prerequisite checks run before anything under the working root is touched.
//!
//! Checks only report; nothing is installed. Hints go to stdout because they
//! are operator instructions, not diagnostics.
use crate::process::run_status;

/// A binary that must be on `PATH`, plus the hint printed when it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite {
    pub name: &'static str,
    pub hint: &'static str,
}

/// Binaries required by the bootstrap and the spec run.
pub const PREREQ_BINARIES: &[Prerequisite] = &[
    Prerequisite {
        name: "tox",
        hint: "Please install tox:\nsudo apt install tox",
    },
    Prerequisite {
        name: "bzr",
        hint: "Please install bzr:\nsudo apt install bzr",
    },
    Prerequisite {
        name: "juju",
        hint: "Please install juju:\nsudo snap install juju --classic",
    },
];

/// Variable whose presence shows an OpenStack novarc has been sourced.
pub const OS_AUTH_ENV: &str = "OS_AUTH_URL";

const OS_ENV_HINT: &str = "OS_* variables not set in environment. Please source novarc for \
                           serverstack (probably ~/novarc) and rerun";
const JUJU_HINT: &str = "Error accessing juju model. Please ensure a juju model is in focus for \
                         mojo to deploy into";

/// Return every prerequisite whose binary cannot be found on `PATH`.
pub fn missing_binaries(prereqs: &[Prerequisite]) -> Vec<Prerequisite> {
    prereqs
        .iter()
        .filter(|prereq| match which::which(prereq.name) {
            Ok(path) => {
                tracing::debug!(name = prereq.name, path = %path.display(), "found prerequisite");
                false
            }
            Err(_) => true,
        })
        .copied()
        .collect()
}

/// Print a hint for each missing binary; true when none are missing.
pub fn check_binaries(prereqs: &[Prerequisite]) -> bool {
    let missing = missing_binaries(prereqs);
    for prereq in &missing {
        println!("{}", prereq.hint);
    }
    missing.is_empty()
}

/// True when the OpenStack auth URL is set to a non-empty value.
pub fn os_env_present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

pub fn check_os_env() -> bool {
    let value = std::env::var(OS_AUTH_ENV).ok();
    if os_env_present(value.as_deref()) {
        return true;
    }
    println!("{OS_ENV_HINT}");
    false
}

/// Run `<juju> status` and report whether a model is reachable.
pub fn check_juju(juju: &str) -> bool {
    match run_status(juju, &["status"], None) {
        Ok(status) if status.success() => true,
        Ok(_) => {
            println!("{JUJU_HINT}");
            false
        }
        Err(err) => {
            tracing::debug!(error = %err, "juju status did not run");
            println!("{JUJU_HINT}");
            false
        }
    }
}

/// Run all checks in order, stopping at the first failing group.
pub fn check_all() -> bool {
    check_binaries(PREREQ_BINARIES) && check_os_env() && check_juju("juju")
}

#[cfg(test)]
#[path = "prereqs_tests.rs"]
mod tests;
