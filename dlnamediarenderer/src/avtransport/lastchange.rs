//! Composition du document `LastChange`.
//!
//! Un élément `<Event>` énumère, par InstanceID, l'état de transport
//! courant, le statut, les actions possibles, l'URI et les métadonnées
//! de la ressource, le nombre de pistes et, en lecture, la piste
//! courante.

use std::collections::HashMap;
use std::sync::Arc;

use dlnautils::xml::element_to_inner_string;
use dlnavfs::didl;
use xmltree::{Element, XMLNode};

use super::instance::{AvtsInstance, TransportState};

const EVENT_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/AVT/";

fn val_element(name: &str, value: &str) -> Element {
    let mut elem = Element::new(name);
    elem.attributes.insert("val".to_string(), value.to_string());
    elem
}

/// Document `<Event>` couvrant toutes les instances.
pub(crate) fn compose(instances: &HashMap<u32, Arc<AvtsInstance>>) -> String {
    let mut event = Element::new("Event");
    event
        .attributes
        .insert("xmlns".to_string(), EVENT_NAMESPACE.to_string());

    let mut ids: Vec<u32> = instances.keys().copied().collect();
    ids.sort_unstable();

    for id in ids {
        let Some(instance) = instances.get(&id) else {
            continue;
        };
        event
            .children
            .push(XMLNode::Element(instance_element(instance)));
    }

    element_to_inner_string(&event)
}

fn instance_element(instance: &Arc<AvtsInstance>) -> Element {
    let guard = instance.shared.lock();
    let state = guard.state;
    let possible = guard.possible_actions();

    let mut elem = val_element("InstanceID", &instance.id.to_string());
    let mut push = |child: Element| elem.children.push(XMLNode::Element(child));

    push(val_element("TransportState", state.as_upnp()));
    push(val_element("TransportStatus", "OK"));
    push(val_element("CurrentTransportActions", &possible));

    let current = guard.playlist.current_entry();
    if let Some(entry) = current {
        let item = entry.item.lock();
        push(val_element("AVTransportURI", item.filename()));
        let metadata = didl::single_item_document(entry.id, &item).unwrap_or_default();
        push(val_element("AVTransportURIMetaData", &metadata));
    }

    if !guard.playlist.is_empty() {
        push(val_element(
            "NumberOfTracks",
            &guard.playlist.len().to_string(),
        ));
    }

    let mut track = 0;
    if state == TransportState::Playing {
        track = guard.playlist.current_track();
        if let Some(entry) = current {
            let item = entry.item.lock();
            push(val_element("CurrentTrackURI", item.filename()));
            let metadata = didl::single_item_document(entry.id, &item).unwrap_or_default();
            push(val_element("CurrentTrackMetaData", &metadata));
        }
    }
    push(val_element("CurrentTrack", &track.to_string()));

    push(val_element("PlaybackStorageMedium", "UNKNOWN"));
    push(val_element("RecordStorageMedium", "NOT_IMPLEMENTED"));
    push(val_element("CurrentPlayMode", "NORMAL"));
    push(val_element("TransportPlaySpeed", "1"));
    push(val_element("RecordMediumWriteStatus", "NOT_IMPLEMENTED"));
    push(val_element("CurrentRecordQualityMode", "NOT_IMPLEMENTED"));
    push(val_element("PossiblePlaybackStorageMedia", "UNKNOWN,NETWORK"));
    push(val_element("PossibleRecordStorageMedia", "NOT_IMPLEMENTED"));
    push(val_element("PossibleRecordQualityModes", "NOT_IMPLEMENTED"));

    elem
}
