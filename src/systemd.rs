use tracing::debug;
use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::OwnedObjectPath;

use crate::error::InstallError;

/// Unit name of the host firmware's background service.
pub const KLIPPER_UNIT: &str = "klipper.service";

/// Seam over the init system so the preflight and restart logic can be
/// exercised without a running systemd.
pub trait ServiceManager {
    /// Primary names of every unit currently known to the manager.
    fn list_unit_names(&self) -> Result<Vec<String>, InstallError>;

    fn restart_unit(&self, unit: &str) -> Result<(), InstallError>;
}

/// systemd over the system D-Bus.
pub struct SystemdManager {
    connection: Connection,
}

/// Row shape of org.freedesktop.systemd1.Manager.ListUnits.
type UnitRecord = (
    String,          // primary unit name
    String,          // description
    String,          // load state
    String,          // active state
    String,          // sub state
    String,          // follower unit
    OwnedObjectPath, // unit object path
    u32,             // queued job id
    String,          // queued job type
    OwnedObjectPath, // queued job object path
);

impl SystemdManager {
    pub fn connect() -> Result<Self, InstallError> {
        let connection = Connection::system().map_err(|err| {
            InstallError::ServiceManager(format!("connect to system D-Bus: {err}"))
        })?;
        Ok(Self { connection })
    }
}

impl ServiceManager for SystemdManager {
    fn list_unit_names(&self) -> Result<Vec<String>, InstallError> {
        let proxy = Proxy::new(
            &self.connection,
            "org.freedesktop.systemd1",
            "/org/freedesktop/systemd1",
            "org.freedesktop.systemd1.Manager",
        )
        .map_err(|err| InstallError::ServiceManager(format!("create systemd proxy: {err}")))?;

        let units: Vec<UnitRecord> = proxy
            .call("ListUnits", &())
            .map_err(|err| InstallError::ServiceManager(format!("ListUnits: {err}")))?;
        debug!(count = units.len(), "enumerated systemd units");
        Ok(units.into_iter().map(|unit| unit.0).collect())
    }

    fn restart_unit(&self, unit: &str) -> Result<(), InstallError> {
        let proxy = Proxy::new(
            &self.connection,
            "org.freedesktop.systemd1",
            "/org/freedesktop/systemd1",
            "org.freedesktop.systemd1.Manager",
        )
        .map_err(|err| InstallError::ServiceManager(format!("create systemd proxy: {err}")))?;

        let (_job,): (OwnedObjectPath,) = proxy
            .call("RestartUnit", &(unit, "replace"))
            .map_err(|err| InstallError::ServiceManager(format!("restart {unit}: {err}")))?;
        debug!(unit, "restart queued");
        Ok(())
    }
}
