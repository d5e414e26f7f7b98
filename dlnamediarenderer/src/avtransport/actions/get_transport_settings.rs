//! Action GetTransportSettings.

use dlnaupnp::ActionEvent;

use crate::avtransport::AvtsService;
use crate::avtransport::actions::resolve_instance;

pub(crate) fn get_transport_settings(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    if resolve_instance(service, ev).is_none() {
        return;
    }
    ev.add_response("PlayMode", "NORMAL");
    ev.add_response("RecQualityMode", "NOT_IMPLEMENTED");
}
