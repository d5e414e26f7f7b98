//! Action SetNextAVTransportURI.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, error_codes};

pub(crate) fn set_next_avtransport_uri(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };
    let Some(uri) = ev.get_string("NextURI") else {
        ev.set_error(error_codes::ACTION_FAILED, "Missing NextURI");
        return;
    };

    info!("🎯 SetNextAVTransportURI #{} {}", instance.id, uri);

    if !instance.shared.lock().playlist.contains_uri(&uri) {
        match service.inner().registry.create_item(&uri) {
            Ok(item) => instance.shared.lock().playlist.push_item(&uri, item),
            Err(_) => {
                ev.set_error(error_codes::ILLEGAL_MIME, "Illegal MIME type");
                return;
            }
        }
    }
    instance.shared.lock().playlist.recompute_next();
}
