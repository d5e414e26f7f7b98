//! Action SetAVTransportURI.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, TransportState, error_codes};

/// Depuis NO_MEDIA l'instance passe en STOPPED ; en STOPPED la playlist
/// est vidée puis re-bufferisée ; en lecture ou en pause l'URI s'ajoute
/// en fin de playlist. Une URI non profilable répond 714.
pub(crate) fn set_avtransport_uri(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };
    let Some(uri) = ev.get_string("CurrentURI") else {
        ev.set_error(error_codes::ACTION_FAILED, "Missing CurrentURI");
        return;
    };
    let _uri_metadata = ev.get_string("CurrentURIMetaData").unwrap_or_default();

    info!("🎯 SetAVTransportURI #{} {}", instance.id, uri);

    {
        let mut guard = instance.shared.lock();
        if guard.state == TransportState::NoMedia {
            guard.state = TransportState::Stopped;
            instance.state_change.notify_all();
        }
        if guard.state == TransportState::Stopped {
            guard.playlist.clear();
        }
    }

    // Profilage hors du verrou : l'ouverture du flux peut être longue
    if !instance.shared.lock().playlist.contains_uri(&uri) {
        match service.inner().registry.create_item(&uri) {
            Ok(item) => instance.shared.lock().playlist.push_item(&uri, item),
            Err(_) => {
                ev.set_error(error_codes::ILLEGAL_MIME, "Illegal MIME type");
                return;
            }
        }
    }

    let mut guard = instance.shared.lock();
    if guard.state == TransportState::Stopped {
        guard.playlist.rewind();
    } else {
        guard.playlist.recompute_next();
    }
    instance.state_change.notify_all();
}
