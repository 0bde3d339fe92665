use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::Cli;

/// Environment override for the extension source directory. Used by packaging
/// and tests; normal invocations resolve the directory of the executable.
pub const SOURCE_ROOT_ENV: &str = "KTCC_INSTALL_SRC";

/// Invocation context, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Directory holding the extension's `*.py` modules.
    pub source_root: PathBuf,
    /// Root of the Klipper checkout the extension is linked into.
    pub klipper_root: PathBuf,
    pub restart_service: bool,
}

impl InstallConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let exe = env::current_exe().context("resolve installer executable path")?;
        let source_root = source_root_from(env::var_os(SOURCE_ROOT_ENV), &exe)?;
        let klipper_root = klipper_root_from(cli.klipper_root.clone(), env::var_os("HOME"))?;
        Ok(Self {
            source_root,
            klipper_root,
            restart_service: cli.restart,
        })
    }
}

/// The source root follows the installer binary, not the working directory,
/// so the tool behaves the same no matter where the operator runs it from.
fn source_root_from(env_override: Option<OsString>, exe: &Path) -> Result<PathBuf> {
    if let Some(dir) = env_override {
        return Ok(PathBuf::from(dir));
    }
    let dir = exe.parent().with_context(|| {
        format!("installer path {} has no parent directory", exe.display())
    })?;
    Ok(dir.to_path_buf())
}

fn klipper_root_from(cli_override: Option<PathBuf>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(root) = cli_override {
        return Ok(root);
    }
    let Some(home) = home else {
        bail!("HOME is not set; pass the Klipper root with -k");
    };
    Ok(PathBuf::from(home).join("klipper"))
}
