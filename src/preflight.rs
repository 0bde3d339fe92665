use tracing::debug;

use crate::error::InstallError;
use crate::systemd::ServiceManager;

/// Refuse to run as root. The links must be owned by the user that owns the
/// Klipper checkout, and a root-owned extras entry breaks later updates.
pub fn require_not_root() -> Result<(), InstallError> {
    check_euid(effective_uid())
}

fn effective_uid() -> u32 {
    // geteuid has no failure modes.
    unsafe { libc::geteuid() }
}

fn check_euid(euid: u32) -> Result<(), InstallError> {
    if euid == 0 {
        return Err(InstallError::RootUser);
    }
    debug!(euid, "running unprivileged");
    Ok(())
}

/// The host service must already be registered before the extension can be
/// deployed. Detection is an exact name match against the enumerated units.
pub fn require_service(manager: &dyn ServiceManager, unit: &str) -> Result<(), InstallError> {
    let units = manager.list_unit_names()?;
    if units.iter().any(|name| name == unit) {
        debug!(unit, "host service registered");
        Ok(())
    } else {
        Err(InstallError::ServiceMissing {
            unit: unit.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeManager {
        units: Vec<String>,
    }

    impl ServiceManager for FakeManager {
        fn list_unit_names(&self) -> Result<Vec<String>, InstallError> {
            Ok(self.units.clone())
        }

        fn restart_unit(&self, _unit: &str) -> Result<(), InstallError> {
            Ok(())
        }
    }

    #[test]
    fn euid_zero_is_rejected() {
        assert!(matches!(check_euid(0), Err(InstallError::RootUser)));
    }

    #[test]
    fn non_zero_euid_passes() {
        assert!(check_euid(1000).is_ok());
    }

    #[test]
    fn registered_service_passes() {
        let manager = FakeManager {
            units: vec!["ssh.service".into(), "klipper.service".into()],
        };
        assert!(require_service(&manager, "klipper.service").is_ok());
    }

    #[test]
    fn missing_service_is_rejected() {
        let manager = FakeManager {
            units: vec!["moonraker.service".into()],
        };
        let err = require_service(&manager, "klipper.service").unwrap_err();
        assert!(matches!(err, InstallError::ServiceMissing { unit } if unit == "klipper.service"));
    }

    #[test]
    fn service_match_is_exact() {
        let manager = FakeManager {
            units: vec!["klipper-mcu.service".into()],
        };
        assert!(require_service(&manager, "klipper.service").is_err());
    }
}
