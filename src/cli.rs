//! CLI argument parsing for the mojo spec wrapper.
//!
//! The CLI is thin: it only collects inputs, and every default that touches
//! the filesystem is resolved in `main` so tests can inject their own.
use clap::Parser;
use std::path::PathBuf;

/// Default working directory owned by a single invocation.
pub const DEFAULT_ROOT: &str = "/tmp/go-mojo";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "go-mojo",
    version,
    about = "Bootstrap a mojo toolchain and run an OpenStack mojo spec",
    after_help = "Examples:\n  go-mojo -s bionic specs/full_stack/next_openstack_upgrade/queens\n  go-mojo -p -w 20190101120000 -s bionic specs/full_stack/next_designate_ha/stein\n  go-mojo -l ~/src/openstack-mojo-specs -s focal specs/full_stack/next_ha/ussuri"
)]
pub struct RunArgs {
    /// Skip recreating venv. Speeds up deploy but may get stale zaza etc
    #[arg(short = 'p', long)]
    pub preserve_venv: bool,

    /// Ubuntu series to use eg bionic
    #[arg(short = 's', long, value_name = "SERIES")]
    pub series: Option<String>,

    /// Workspace name to use. Useful when rerunning a spec and reusing the
    /// existing environment (defaults to a YYYYMMDDHHMMSS timestamp)
    #[arg(short = 'w', long, value_name = "NAME")]
    pub workspace_name: Option<String>,

    /// Use copy of openstack-mojo-specs in directory
    #[arg(short = 'l', long, value_name = "DIR")]
    pub local_spec_dir: Option<PathBuf>,

    /// Working directory for the toolchain, specs and mojo root
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Mojo environment overrides file (defaults to ~/.mojo.yaml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with status 2 when the spec run fails
    #[arg(long)]
    pub strict: bool,

    /// Emit debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Full path to test eg specs/full_stack/next_designate_ha/stein
    #[arg(value_name = "TEST_NAME")]
    pub test_name: String,
}
