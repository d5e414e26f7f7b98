//! Table des variables d'état du ContentDirectory.

use dlnaupnp::{StateVariable, VarType};

pub static BROWSE_FLAG_ALLOWED: &[&str] = &["BrowseMetadata", "BrowseDirectChildren"];
pub static TRANSFER_STATUS_ALLOWED: &[&str] = &["COMPLETED", "ERROR", "IN_PROGRESS", "STOPPED"];

pub fn variable_table() -> Vec<StateVariable> {
    vec![
        StateVariable::new("SearchCapabilities", VarType::String),
        StateVariable::new("SortCapabilities", VarType::String),
        StateVariable::new("SystemUpdateID", VarType::Ui4).evented(),
        StateVariable::new("ContainerUpdateIDs", VarType::Ui4).evented(),
        StateVariable::new("ServiceResetToken", VarType::String),
        StateVariable::new("LastChange", VarType::String).evented(),
        StateVariable::new("TransferIDs", VarType::String).evented(),
        StateVariable::new("FeatureList", VarType::String),
        StateVariable::new("DeviceMode", VarType::String).evented(),
        StateVariable::new("A_ARG_TYPE_ObjectID", VarType::String),
        StateVariable::new("A_ARG_TYPE_Result", VarType::String),
        StateVariable::new("A_ARG_TYPE_SearchCriteria", VarType::String),
        StateVariable::new("A_ARG_TYPE_BrowseFlag", VarType::String).allowed(BROWSE_FLAG_ALLOWED),
        StateVariable::new("A_ARG_TYPE_Filter", VarType::String),
        StateVariable::new("A_ARG_TYPE_SortCriteria", VarType::String),
        StateVariable::new("A_ARG_TYPE_Index", VarType::Ui4),
        StateVariable::new("A_ARG_TYPE_Count", VarType::Ui4),
        StateVariable::new("A_ARG_TYPE_UpdateID", VarType::Ui4),
        StateVariable::new("A_ARG_TYPE_TransferID", VarType::Ui4),
        StateVariable::new("A_ARG_TYPE_TransferStatus", VarType::String)
            .allowed(TRANSFER_STATUS_ALLOWED),
        StateVariable::new("A_ARG_TYPE_TransferLength", VarType::String),
        StateVariable::new("A_ARG_TYPE_TransferTotal", VarType::String),
        StateVariable::new("A_ARG_TYPE_TagValueList", VarType::String),
        StateVariable::new("A_ARG_TYPE_URI", VarType::Uri),
    ]
}
