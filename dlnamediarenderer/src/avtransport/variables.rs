//! Table des variables d'état de l'AVTransport.

use dlnaupnp::{StateVariable, VarType};

pub static TRANSPORT_STATE_ALLOWED: &[&str] = &[
    "STOPPED",
    "PLAYING",
    "TRANSITIONING",
    "PAUSED_PLAYBACK",
    "PAUSED_RECORDING",
    "RECORDING",
    "NO_MEDIA_PRESENT",
];

pub static PLAY_MODE_ALLOWED: &[&str] = &[
    "NORMAL",
    "SHUFFLE",
    "REPEAT_ONE",
    "REPEAT_ALL",
    "RANDOM",
    "DIRECT_1",
    "INTRO",
];

pub static SEEK_MODE_ALLOWED: &[&str] = &["TRACK_NR"];

pub fn variable_table() -> Vec<StateVariable> {
    vec![
        StateVariable::new("TransportState", VarType::String).allowed(TRANSPORT_STATE_ALLOWED),
        StateVariable::new("TransportStatus", VarType::String),
        StateVariable::new("CurrentMediaCategory", VarType::String),
        StateVariable::new("PlaybackStorageMedium", VarType::String),
        StateVariable::new("RecordStorageMedium", VarType::String),
        StateVariable::new("PossiblePlaybackStorageMedia", VarType::String),
        StateVariable::new("PossibleRecordStorageMedia", VarType::String),
        StateVariable::new("CurrentPlayMode", VarType::String).allowed(PLAY_MODE_ALLOWED),
        StateVariable::new("TransportPlaySpeed", VarType::String),
        StateVariable::new("RecordMediumWriteStatus", VarType::String),
        StateVariable::new("CurrentRecordQualityMode", VarType::String),
        StateVariable::new("PossibleRecordQualityModes", VarType::String),
        StateVariable::new("NumberOfTracks", VarType::Ui4),
        StateVariable::new("CurrentTrack", VarType::Ui4),
        StateVariable::new("CurrentTrackDuration", VarType::String),
        StateVariable::new("CurrentMediaDuration", VarType::String),
        StateVariable::new("CurrentTrackMetaData", VarType::String),
        StateVariable::new("CurrentTrackURI", VarType::String),
        StateVariable::new("AVTransportURI", VarType::String),
        StateVariable::new("AVTransportURIMetaData", VarType::String),
        StateVariable::new("NextAVTransportURI", VarType::String),
        StateVariable::new("NextAVTransportURIMetaData", VarType::String),
        StateVariable::new("RelativeTimePosition", VarType::String),
        StateVariable::new("AbsoluteTimePosition", VarType::String),
        StateVariable::new("RelativeCounterPosition", VarType::I4),
        StateVariable::new("AbsoluteCounterPosition", VarType::Ui4),
        StateVariable::new("CurrentTransportActions", VarType::String),
        StateVariable::new("LastChange", VarType::String).evented(),
        StateVariable::new("DRMState", VarType::String),
        StateVariable::new("SyncOffset", VarType::String),
        StateVariable::new("A_ARG_TYPE_SeekMode", VarType::String).allowed(SEEK_MODE_ALLOWED),
        StateVariable::new("A_ARG_TYPE_SeekTarget", VarType::String),
        StateVariable::new("A_ARG_TYPE_InstanceID", VarType::Ui4),
    ]
}
