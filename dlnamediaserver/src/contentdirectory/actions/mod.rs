//! Actions du ContentDirectory : table SCPD et handlers.

mod browse;
mod get_feature_list;
mod get_search_capabilities;
mod get_sort_capabilities;
mod get_system_update_id;
mod search;

use dlnaupnp::ServiceAction;

pub(crate) use browse::browse;
pub(crate) use get_feature_list::get_feature_list;
pub(crate) use get_search_capabilities::get_search_capabilities;
pub(crate) use get_sort_capabilities::get_sort_capabilities;
pub(crate) use get_system_update_id::get_system_update_id;
pub(crate) use search::search;

pub fn action_table() -> Vec<ServiceAction> {
    vec![
        // Actions obligatoires
        ServiceAction::new("GetSearchCapabilities").arg_out("SearchCaps", "SearchCapabilities"),
        ServiceAction::new("GetSortCapabilities").arg_out("SortCaps", "SortCapabilities"),
        ServiceAction::new("GetSystemUpdateID").arg_out("Id", "SystemUpdateID"),
        ServiceAction::new("Browse")
            .arg_in("ObjectID", "A_ARG_TYPE_ObjectID")
            .arg_in("BrowseFlag", "A_ARG_TYPE_BrowseFlag")
            .arg_in("Filter", "A_ARG_TYPE_Filter")
            .arg_in("StartingIndex", "A_ARG_TYPE_Index")
            .arg_in("RequestedCount", "A_ARG_TYPE_Count")
            .arg_in("SortCriteria", "A_ARG_TYPE_SortCriteria")
            .arg_out("Result", "A_ARG_TYPE_Result")
            .arg_out("NumberReturned", "A_ARG_TYPE_Count")
            .arg_out("TotalMatches", "A_ARG_TYPE_Count")
            .arg_out("UpdateID", "A_ARG_TYPE_UpdateID"),
        // Actions optionnelles
        ServiceAction::new("Search")
            .arg_in("ContainerID", "A_ARG_TYPE_ObjectID")
            .arg_in("SearchCriteria", "A_ARG_TYPE_SearchCriteria")
            .arg_in("Filter", "A_ARG_TYPE_Filter")
            .arg_in("StartingIndex", "A_ARG_TYPE_Index")
            .arg_in("RequestedCount", "A_ARG_TYPE_Count")
            .arg_in("SortCriteria", "A_ARG_TYPE_SortCriteria")
            .arg_out("Result", "A_ARG_TYPE_Result")
            .arg_out("NumberReturned", "A_ARG_TYPE_Count")
            .arg_out("TotalMatches", "A_ARG_TYPE_Count")
            .arg_out("UpdateID", "A_ARG_TYPE_UpdateID"),
        ServiceAction::new("GetFeatureList").arg_out("FeatureList", "FeatureList"),
        // Déclarées sans implémentation
        ServiceAction::stub("CreateObject"),
        ServiceAction::stub("DestroyObject"),
        ServiceAction::stub("UpdateObject"),
        ServiceAction::stub("ImportResource"),
        ServiceAction::stub("ExportResource"),
        ServiceAction::stub("StopTransferResource"),
        ServiceAction::stub("GetTransferProgress"),
        ServiceAction::stub("DeleteResource"),
        ServiceAction::stub("CreateReference"),
    ]
}
