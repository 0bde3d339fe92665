use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ktcc_install::cli::Cli;
use ktcc_install::config::InstallConfig;
use ktcc_install::deploy::{DeployTarget, ExtrasLink};
use ktcc_install::preflight;
use ktcc_install::systemd::{ServiceManager, SystemdManager, KLIPPER_UNIT};

fn main() -> ExitCode {
    // clap exits 2 on usage errors by default; the installer contract is
    // 0 for help/version and 1 for everything else.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = InstallConfig::from_cli(cli)?;

    // Both preconditions stop the run before any filesystem mutation.
    preflight::require_not_root()?;
    let systemd = SystemdManager::connect()?;
    preflight::require_service(&systemd, KLIPPER_UNIT)?;

    let target = ExtrasLink::new(&config.klipper_root);
    let report = target
        .install(&config.source_root)
        .with_context(|| format!("install from {}", config.source_root.display()))?;
    info!(
        "linked {} extension file(s) into {}",
        report.linked.len(),
        target.extras_dir().display()
    );

    if config.restart_service {
        systemd.restart_unit(KLIPPER_UNIT)?;
        info!("requested restart of {KLIPPER_UNIT}");
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
