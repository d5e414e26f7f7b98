//! Actions GetMediaInfo et GetMediaInfo_Ext.

use dlnaupnp::ActionEvent;
use dlnavfs::didl;

use crate::avtransport::AvtsService;
use crate::avtransport::actions::resolve_instance;

const DURATION_ZERO: &str = "00:00:00";
const NO_TRACK_URI: &str = "no track uri";

pub(crate) fn get_media_info(service: &AvtsService, ev: &mut ActionEvent<'_>, ext: bool) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    if ext {
        ev.add_response("CurrentType", "TRACK_AWARE");
    }

    let guard = instance.shared.lock();
    ev.add_response("NrTracks", guard.playlist.len().to_string());

    match guard.playlist.current_entry() {
        Some(entry) => {
            let item = entry.item.lock();
            let duration = item
                .properties
                .as_ref()
                .map(|p| p.duration.clone())
                .filter(|duration| !duration.is_empty())
                .unwrap_or_else(|| DURATION_ZERO.to_string());
            ev.add_response("MediaDuration", duration);
            ev.add_response("CurrentURI", item.filename());
            let metadata = didl::single_item_document(entry.id, &item).unwrap_or_default();
            ev.add_response("CurrentURIMetaData", metadata);
        }
        None => {
            ev.add_response("MediaDuration", DURATION_ZERO);
            ev.add_response("CurrentURI", NO_TRACK_URI);
            ev.add_response("CurrentURIMetaData", "");
        }
    }

    match guard.playlist.next_entry() {
        Some(entry) => {
            let item = entry.item.lock();
            ev.add_response("NextURI", item.filename());
            let metadata = didl::single_item_document(entry.id, &item).unwrap_or_default();
            ev.add_response("NextURIMetaData", metadata);
        }
        None => {
            ev.add_response("NextURI", "");
            ev.add_response("NextURIMetaData", "");
        }
    }

    ev.add_response("PlayMedium", "NETWORK");
    ev.add_response("RecordMedium", "NOT_IMPLEMENTED");
    ev.add_response("WriteStatus", "NOT_IMPLEMENTED");
}
