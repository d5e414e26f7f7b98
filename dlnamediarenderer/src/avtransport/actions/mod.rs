//! Actions de l'AVTransport : table SCPD et handlers.

mod get_current_transport_actions;
mod get_device_capabilities;
mod get_media_info;
mod get_position_info;
mod get_transport_info;
mod get_transport_settings;
mod next;
mod pause;
mod play;
mod previous;
mod seek;
mod set_avtransport_uri;
mod set_next_avtransport_uri;
mod stop;

use std::sync::Arc;

use dlnaupnp::{ActionEvent, ServiceAction};

pub(crate) use get_current_transport_actions::get_current_transport_actions;
pub(crate) use get_device_capabilities::get_device_capabilities;
pub(crate) use get_media_info::get_media_info;
pub(crate) use get_position_info::get_position_info;
pub(crate) use get_transport_info::get_transport_info;
pub(crate) use get_transport_settings::get_transport_settings;
pub(crate) use next::next;
pub(crate) use pause::pause;
pub(crate) use play::play;
pub(crate) use previous::previous;
pub(crate) use seek::seek;
pub(crate) use set_avtransport_uri::set_avtransport_uri;
pub(crate) use set_next_avtransport_uri::set_next_avtransport_uri;
pub(crate) use stop::stop;

use super::{AvtsInstance, AvtsService, error_codes};

/// Résout l'instance visée par la requête, ou pose l'erreur 718.
pub(crate) fn resolve_instance(
    service: &AvtsService,
    ev: &mut ActionEvent<'_>,
) -> Option<Arc<AvtsInstance>> {
    let id = ev.get_ui4("InstanceID");
    match service.instance(id) {
        Some(instance) => Some(instance),
        None => {
            ev.set_error(error_codes::INVALID_INSTANCE, "Invalid InstanceID");
            None
        }
    }
}

pub fn action_table() -> Vec<ServiceAction> {
    vec![
        ServiceAction::new("SetAVTransportURI")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("CurrentURI", "AVTransportURI")
            .arg_in("CurrentURIMetaData", "AVTransportURIMetaData"),
        ServiceAction::new("SetNextAVTransportURI")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("NextURI", "NextAVTransportURI")
            .arg_in("NextURIMetaData", "NextAVTransportURIMetaData"),
        ServiceAction::new("GetMediaInfo")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("NrTracks", "NumberOfTracks")
            .arg_out("MediaDuration", "CurrentMediaDuration")
            .arg_out("CurrentURI", "AVTransportURI")
            .arg_out("CurrentURIMetaData", "AVTransportURIMetaData")
            .arg_out("NextURI", "NextAVTransportURI")
            .arg_out("NextURIMetaData", "NextAVTransportURIMetaData")
            .arg_out("PlayMedium", "PlaybackStorageMedium")
            .arg_out("RecordMedium", "RecordStorageMedium")
            .arg_out("WriteStatus", "RecordMediumWriteStatus"),
        ServiceAction::new("GetMediaInfo_Ext")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("CurrentType", "CurrentMediaCategory")
            .arg_out("NrTracks", "NumberOfTracks")
            .arg_out("MediaDuration", "CurrentMediaDuration")
            .arg_out("CurrentURI", "AVTransportURI")
            .arg_out("CurrentURIMetaData", "AVTransportURIMetaData")
            .arg_out("NextURI", "NextAVTransportURI")
            .arg_out("NextURIMetaData", "NextAVTransportURIMetaData")
            .arg_out("PlayMedium", "PlaybackStorageMedium")
            .arg_out("RecordMedium", "RecordStorageMedium")
            .arg_out("WriteStatus", "RecordMediumWriteStatus"),
        ServiceAction::new("GetTransportInfo")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("CurrentTransportState", "TransportState")
            .arg_out("CurrentTransportStatus", "TransportStatus")
            .arg_out("CurrentSpeed", "TransportPlaySpeed"),
        ServiceAction::new("GetPositionInfo")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("Track", "CurrentTrack")
            .arg_out("TrackDuration", "CurrentTrackDuration")
            .arg_out("TrackMetaData", "CurrentTrackMetaData")
            .arg_out("TrackURI", "CurrentTrackURI")
            .arg_out("RelTime", "RelativeTimePosition")
            .arg_out("AbsTime", "AbsoluteTimePosition")
            .arg_out("RelCount", "RelativeCounterPosition")
            .arg_out("AbsCount", "AbsoluteCounterPosition"),
        ServiceAction::new("GetDeviceCapabilities")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("PlayMedia", "PossiblePlaybackStorageMedia")
            .arg_out("RecMedia", "PossibleRecordStorageMedia")
            .arg_out("RecQualityModes", "PossibleRecordQualityModes"),
        ServiceAction::new("GetTransportSettings")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("PlayMode", "CurrentPlayMode")
            .arg_out("RecQualityMode", "CurrentRecordQualityMode"),
        ServiceAction::new("Stop").arg_in("InstanceID", "A_ARG_TYPE_InstanceID"),
        ServiceAction::new("Play")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("Speed", "TransportPlaySpeed"),
        ServiceAction::new("Pause").arg_in("InstanceID", "A_ARG_TYPE_InstanceID"),
        ServiceAction::new("Record").arg_in("InstanceID", "A_ARG_TYPE_InstanceID"),
        ServiceAction::new("Seek")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("Unit", "A_ARG_TYPE_SeekMode")
            .arg_in("Target", "A_ARG_TYPE_SeekTarget"),
        ServiceAction::new("Next").arg_in("InstanceID", "A_ARG_TYPE_InstanceID"),
        ServiceAction::new("Previous").arg_in("InstanceID", "A_ARG_TYPE_InstanceID"),
        ServiceAction::new("SetPlayMode")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("NewPlayMode", "CurrentPlayMode"),
        ServiceAction::new("SetRecordQualityMode")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_in("NewRecordQualityMode", "CurrentRecordQualityMode"),
        ServiceAction::new("GetCurrentTransportActions")
            .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
            .arg_out("Actions", "CurrentTransportActions"),
    ]
}
