//! Action GetCurrentConnectionInfo : la connexion par défaut `0`.

use dlnaupnp::ActionEvent;

use crate::connectionmanager::CmsService;

pub(crate) fn get_current_connection_info(service: &CmsService, ev: &mut ActionEvent<'_>) {
    ev.add_response("ConnectionID", "0");
    ev.add_response("RcsID", "-1");
    ev.add_response("AVTransportID", "-1");
    for sink in service.sinks() {
        ev.add_response("ProtocolInfo", sink.clone());
    }
    ev.add_response("PeerConnectionManager", "");
    ev.add_response("PeerConnectionID", "-1");
    ev.add_response("Direction", "Output");
    ev.add_response("Status", "OK");
}
