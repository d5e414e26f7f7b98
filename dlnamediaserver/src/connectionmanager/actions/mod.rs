//! Actions du ConnectionManager : table SCPD et handlers.

mod get_current_connection_ids;
mod get_current_connection_info;
mod get_protocol_info;

use dlnaupnp::ServiceAction;

pub(crate) use get_current_connection_ids::get_current_connection_ids;
pub(crate) use get_current_connection_info::get_current_connection_info;
pub(crate) use get_protocol_info::get_protocol_info;

pub fn action_table() -> Vec<ServiceAction> {
    vec![
        ServiceAction::new("GetProtocolInfo")
            .arg_out("Source", "SourceProtocolInfo")
            .arg_out("Sink", "SinkProtocolInfo"),
        ServiceAction::stub("PrepareForConnection"),
        ServiceAction::stub("ConnectionComplete"),
        ServiceAction::new("GetCurrentConnectionIDs")
            .arg_out("ConnectionIDs", "CurrentConnectionIDs"),
        ServiceAction::new("GetCurrentConnectionInfo")
            .arg_in("ConnectionID", "A_ARG_TYPE_ConnectionID")
            .arg_out("RcsID", "A_ARG_TYPE_RcsID")
            .arg_out("AVTransportID", "A_ARG_TYPE_AVTransportID")
            .arg_out("ProtocolInfo", "A_ARG_TYPE_ProtocolInfo")
            .arg_out("PeerConnectionManager", "A_ARG_TYPE_ConnectionManager")
            .arg_out("PeerConnectionID", "A_ARG_TYPE_ConnectionID")
            .arg_out("Direction", "A_ARG_TYPE_Direction")
            .arg_out("Status", "A_ARG_TYPE_ConnectionStatus"),
    ]
}
