use std::ffi::OsString;
use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::InstallError;

/// File extension of the extension's Klippy modules.
const MODULE_EXTENSION: &str = "py";

/// Files created by one install run, in link order.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub linked: Vec<PathBuf>,
}

/// A location that can receive extension files. The host framework's plugin
/// discovery convention stays behind this seam.
pub trait DeployTarget {
    /// Install every matching file under `source_root` into the target.
    fn install(&self, source_root: &Path) -> Result<InstallReport, InstallError>;
}

/// Deployment into Klipper's extras directory via same-named symlinks, the
/// convention Klippy uses to pick up out-of-tree modules.
#[derive(Debug)]
pub struct ExtrasLink {
    extras_dir: PathBuf,
}

impl ExtrasLink {
    pub fn new(klipper_root: &Path) -> Self {
        Self {
            extras_dir: klipper_root.join("klippy").join("extras"),
        }
    }

    pub fn extras_dir(&self) -> &Path {
        &self.extras_dir
    }
}

impl DeployTarget for ExtrasLink {
    fn install(&self, source_root: &Path) -> Result<InstallReport, InstallError> {
        // Never create the directory: a missing extras tree means the root
        // does not point at a Klipper checkout at all.
        if !self.extras_dir.is_dir() {
            return Err(InstallError::ExtrasMissing(self.extras_dir.clone()));
        }

        let mut report = InstallReport::default();
        let files = module_files(source_root)?;
        if files.is_empty() {
            warn!(
                "no *.{MODULE_EXTENSION} files under {}",
                source_root.display()
            );
            return Ok(report);
        }

        for (name, source) in files {
            // Link to the canonical path so the entry stays valid no matter
            // where Klippy resolves it from.
            let source = fs::canonicalize(&source)?;
            let dest = self.extras_dir.join(&name);
            replace_link(&source, &dest)?;
            info!("linked {} -> {}", dest.display(), source.display());
            report.linked.push(dest);
        }
        Ok(report)
    }
}

/// `*.py` files directly under `source_root`, sorted by name so repeated runs
/// log in a stable order.
fn module_files(source_root: &Path) -> Result<Vec<(OsString, PathBuf)>, InstallError> {
    if !source_root.is_dir() {
        return Err(InstallError::SourceMissing(source_root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(source_root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(MODULE_EXTENSION) {
            continue;
        }
        files.push((entry.file_name(), path));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn replace_link(source: &Path, dest: &Path) -> Result<(), InstallError> {
    // symlink_metadata so a dangling leftover link is still replaced.
    if fs::symlink_metadata(dest).is_ok() {
        fs::remove_file(dest)?;
    }
    unix_fs::symlink(source, dest)?;
    Ok(())
}
