use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of the installer. Every variant maps to exit code 1 and
/// a one-line diagnostic; nothing is retried. The operator fixes the
/// environment and reruns.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("this installer must not run as root; re-run it as the user that owns the Klipper install")]
    RootUser,

    #[error("{unit} is not registered with systemd; install Klipper before installing this extension")]
    ServiceMissing { unit: String },

    #[error("service manager: {0}")]
    ServiceManager(String),

    #[error("extras directory {0} does not exist; is the Klipper root correct?")]
    ExtrasMissing(PathBuf),

    #[error("extension source directory {0} does not exist")]
    SourceMissing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
