//! Assemblage du device Media Server.

use std::sync::Arc;

use dlnaupnp::Device;
use dlnaupnp::devices::{DEVICE_TYPE_DMS, DeviceMode};
use dlnavfs::SharedVfs;

use crate::connectionmanager::CmsService;
use crate::contentdirectory::CdsService;
use crate::msregistrar::MsrService;

/// Construit un device `MediaServer:1` avec ConnectionManager,
/// ContentDirectory (adossé au VFS) et, en mode Xbox, le Media Receiver
/// Registrar. L'identité (nom convivial, uuid, modèle) reste à poser par
/// l'appelant avant l'enregistrement.
pub fn new_dms(vfs: SharedVfs, mode: DeviceMode) -> (Device, Arc<CdsService>) {
    let mut device = Device::new(DEVICE_TYPE_DMS, Some("DMS"), mode);

    let cds = Arc::new(CdsService::new(vfs.clone()));
    device.add_service(Arc::new(CmsService::new(vfs)));
    device.add_service(cds.clone());
    if mode.xbox {
        device.add_service(Arc::new(MsrService::new()));
    }

    (device, cds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnavfs::{Vfs, VfsMode, shared};

    #[test]
    fn test_dms_assembly() {
        let vfs = shared(Vfs::new(VfsMode::default()));
        let (device, _cds) = new_dms(vfs, DeviceMode::default());
        assert!(device.find_service("urn:upnp-org:serviceId:ContentDirectory").is_some());
        assert!(device.find_service("urn:upnp-org:serviceId:ConnectionManager").is_some());
        assert!(device
            .find_service("urn:microsoft.com:serviceId:X_MS_MediaReceiverRegistrar")
            .is_none());
    }

    #[test]
    fn test_dms_xbox_has_registrar() {
        let vfs = shared(Vfs::new(VfsMode { dlna: true, xbox: true }));
        let (device, _cds) = new_dms(vfs, DeviceMode { dlna: true, xbox: true });
        assert!(device
            .find_service("urn:microsoft.com:serviceId:X_MS_MediaReceiverRegistrar")
            .is_some());
    }
}
