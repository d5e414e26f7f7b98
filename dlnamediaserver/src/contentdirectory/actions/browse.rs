//! Action Browse : navigation incrémentale dans le VFS.

use dlnaupnp::ActionEvent;
use dlnavfs::{Filter, VfsError};
use tracing::{debug, info};

use crate::contentdirectory::{CdsService, error_codes};

/// Dispatch sur `BrowseFlag` ∈ {BrowseMetadata, BrowseDirectChildren}.
/// Un BrowseMetadata avec `StartingIndex` non nul échoue en 720. Les
/// quatre champs de sortie sont zéro-padés sur dix chiffres.
pub(crate) fn browse(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let object_id = ev.get_ui4("ObjectID");
    let (Some(flag), Some(filter_text)) = (ev.get_string("BrowseFlag"), ev.get_string("Filter"))
    else {
        ev.set_error(error_codes::INVALID_ARGS, "Invalid Args");
        return;
    };
    let starting_index = ev.get_ui4("StartingIndex");
    let requested_count = ev.get_ui4("RequestedCount");
    let sort_criteria = ev.get_string("SortCriteria").unwrap_or_default();

    info!(
        "📂 Browse {} id=#{} start={} count={}",
        flag, object_id, starting_index, requested_count
    );

    let filter = Filter::new(&filter_text);
    let vfs = service.vfs().lock();

    let result = match flag.as_str() {
        "BrowseMetadata" => {
            if starting_index != 0 {
                ev.set_error(error_codes::PROCESS_REQUEST, "Process request failed");
                return;
            }
            vfs.browse_metadata(object_id, &filter)
        }
        "BrowseDirectChildren" => vfs.browse_direct_children(
            object_id,
            starting_index,
            requested_count,
            &filter,
            &sort_criteria,
        ),
        _ => {
            ev.set_error(error_codes::PROCESS_REQUEST, "Process request failed");
            return;
        }
    };

    match result {
        Ok(result) => {
            debug!(
                "✅ Browse returned={} total={}",
                result.number_returned, result.total_matches
            );
            ev.add_response("Result", result.didl);
            ev.add_response("NumberReturned", format!("{:010}", result.number_returned));
            ev.add_response("TotalMatches", format!("{:010}", result.total_matches));
            ev.add_response("UpdateID", format!("{:010}", result.update_id));
        }
        Err(VfsError::UnknownObject(_)) => {
            ev.set_error(error_codes::INVALID_OBJECT_ID, "Invalid object ID");
        }
        Err(_) => {
            ev.set_error(error_codes::ACTION_FAILED, "Action failed");
        }
    }
}
