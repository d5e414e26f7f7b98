//! Action GetTransportInfo.

use dlnaupnp::ActionEvent;

use crate::avtransport::AvtsService;
use crate::avtransport::actions::resolve_instance;

pub(crate) fn get_transport_info(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    ev.add_response("CurrentTransportState", instance.state().as_upnp());
    ev.add_response("CurrentTransportStatus", "OK");
    ev.add_response("CurrentSpeed", "1");
}
