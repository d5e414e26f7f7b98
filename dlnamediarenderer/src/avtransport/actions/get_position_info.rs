//! Action GetPositionInfo.

use dlnaupnp::ActionEvent;
use dlnavfs::didl;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, TransportState};

const DURATION_ZERO: &str = "00:00:00";
const NO_TRACK_URI: &str = "no track uri";

/// Formate un nombre de secondes en `HH:MM:SS`.
fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Position de lecture : piste 1-based, durée, métadonnées DIDL, URI.
/// `RelativeTimePosition` est dérivée du compteur de trames quand le
/// débit le permet, `AbsoluteTimePosition` reste `NOT_IMPLEMENTED`.
pub(crate) fn get_position_info(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    let guard = instance.shared.lock();
    let entry = if guard.state != TransportState::Stopped {
        guard.playlist.current_entry()
    } else {
        None
    };

    let track = if entry.is_some() { guard.playlist.current_track() } else { 0 };
    ev.add_response("Track", track.to_string());

    match entry {
        Some(entry) => {
            let item = entry.item.lock();
            let properties = item.properties.clone();

            let duration = properties
                .as_ref()
                .map(|p| p.duration.clone())
                .filter(|duration| !duration.is_empty())
                .unwrap_or_else(|| DURATION_ZERO.to_string());
            ev.add_response("TrackDuration", duration);

            let metadata = didl::single_item_document(entry.id, &item).unwrap_or_default();
            ev.add_response("TrackMetaData", metadata);
            ev.add_response("TrackURI", item.filename());

            let counter = instance.counter_value() as u64;
            let rel_time = properties
                .as_ref()
                .filter(|p| p.bits_per_sample > 0 && p.sample_frequency > 0)
                .map(|p| {
                    let byte_rate =
                        u64::from(p.sample_frequency) * u64::from(p.bits_per_sample) / 8;
                    let seconds = counter * u64::from(p.samples_per_frame) / byte_rate.max(1);
                    format_hms(seconds)
                });
            match rel_time {
                Some(time) => ev.add_response("RelTime", time),
                None => ev.add_response("RelTime", "NOT_IMPLEMENTED"),
            }
        }
        None => {
            ev.add_response("TrackDuration", DURATION_ZERO);
            ev.add_response("TrackMetaData", "");
            ev.add_response("TrackURI", NO_TRACK_URI);
            ev.add_response("RelTime", "NOT_IMPLEMENTED");
        }
    }

    ev.add_response("AbsTime", "NOT_IMPLEMENTED");
    let counter = instance.counter_value().to_string();
    ev.add_response("RelCount", counter.clone());
    ev.add_response("AbsCount", counter);
}
