//! Assemblage du device Media Renderer.

use std::sync::Arc;

use dlnaprofiler::ProfilerRegistry;
use dlnaupnp::Device;
use dlnaupnp::devices::{DEVICE_TYPE_DMR, DeviceMode};

use crate::avtransport::AvtsService;
use crate::connectionmanager::CmsService;

/// Construit un device `MediaRenderer:1` avec ConnectionManager (sinks
/// issus des profilers) et AVTransport. Le service AVTransport est aussi
/// retourné pour piloter ses instances.
pub fn new_dmr(registry: Arc<ProfilerRegistry>, mode: DeviceMode) -> (Device, Arc<AvtsService>) {
    let mut device = Device::new(DEVICE_TYPE_DMR, Some("DMR"), mode);

    let avts = Arc::new(AvtsService::new(registry.clone()));
    device.add_service(Arc::new(CmsService::from_registry(registry.as_ref())));
    device.add_service(avts.clone());

    (device, avts)
}
