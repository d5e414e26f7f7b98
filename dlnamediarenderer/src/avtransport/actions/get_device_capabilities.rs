//! Action GetDeviceCapabilities.

use dlnaupnp::ActionEvent;

use crate::avtransport::AvtsService;
use crate::avtransport::actions::resolve_instance;

pub(crate) fn get_device_capabilities(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    if resolve_instance(service, ev).is_none() {
        return;
    }
    ev.add_response("PlayMedia", "UNKNOWN,NETWORK");
    ev.add_response("RecMedia", "NOT_IMPLEMENTED");
    ev.add_response("RecQualityModes", "NOT_IMPLEMENTED");
}
