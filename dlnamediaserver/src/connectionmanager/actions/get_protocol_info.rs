//! Action GetProtocolInfo.

use dlnaupnp::ActionEvent;
use tracing::debug;

use crate::connectionmanager::CmsService;

pub(crate) fn get_protocol_info(service: &CmsService, ev: &mut ActionEvent<'_>) {
    let sources = service.source_list();
    let sinks = service.sink_list();
    debug!("🔌 GetProtocolInfo: {} source byte(s)", sources.len());
    ev.add_response("Source", sources);
    ev.add_response("Sink", sinks);
}
