// This crate targets Linux only. Klipper hosts run systemd and the installer
// relies on Unix symlink semantics; building it anywhere else would only
// produce a binary that fails its own preflight.
#[cfg(not(target_os = "linux"))]
compile_error!(
    "ktcc-install is intended to be built on Linux only. Build with a Linux target (e.g. target_os = \"linux\") or develop on a Linux machine."
);

pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod preflight;
pub mod systemd;

pub use cli::Cli;
pub use config::InstallConfig;
pub use deploy::{DeployTarget, ExtrasLink, InstallReport};
pub use error::InstallError;
pub use systemd::{ServiceManager, SystemdManager, KLIPPER_UNIT};
