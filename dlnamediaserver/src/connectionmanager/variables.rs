//! Table des variables d'état du ConnectionManager.

use dlnaupnp::{StateVariable, VarType};

pub static CONNECTION_STATUS_ALLOWED: &[&str] = &[
    "OK",
    "ContentFormatMismatch",
    "InsufficientBandwidth",
    "UnreliableChannel",
    "Unknown",
];
pub static DIRECTION_ALLOWED: &[&str] = &["Input", "Output"];

pub fn variable_table() -> Vec<StateVariable> {
    vec![
        StateVariable::new("SourceProtocolInfo", VarType::String).evented(),
        StateVariable::new("SinkProtocolInfo", VarType::String).evented(),
        StateVariable::new("CurrentConnectionIDs", VarType::String).evented(),
        StateVariable::new("FeatureList", VarType::String),
        StateVariable::new("A_ARG_TYPE_ConnectionStatus", VarType::String)
            .allowed(CONNECTION_STATUS_ALLOWED),
        StateVariable::new("A_ARG_TYPE_ConnectionManager", VarType::String),
        StateVariable::new("A_ARG_TYPE_Direction", VarType::String).allowed(DIRECTION_ALLOWED),
        StateVariable::new("A_ARG_TYPE_ProtocolInfo", VarType::String),
        StateVariable::new("A_ARG_TYPE_ConnectionID", VarType::I4),
        StateVariable::new("A_ARG_TYPE_AVTransportID", VarType::I4),
        StateVariable::new("A_ARG_TYPE_RcsID", VarType::I4),
    ]
}
