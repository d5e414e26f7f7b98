//! Action Search : recherche récursive par critères.

use dlnaupnp::ActionEvent;
use dlnavfs::{Filter, VfsError};
use tracing::info;

use crate::contentdirectory::{CdsService, error_codes};

/// Recherche dans le container donné (repli sur la racine quand l'id est
/// inconnu) et retourne la même enveloppe à quatre champs que Browse.
pub(crate) fn search(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let requested_id = ev.get_ui4("ObjectID");
    let (Some(criteria), Some(filter_text)) =
        (ev.get_string("SearchCriteria"), ev.get_string("Filter"))
    else {
        ev.set_error(error_codes::INVALID_ARGS, "Invalid Args");
        return;
    };
    let starting_index = ev.get_ui4("StartingIndex");
    let requested_count = ev.get_ui4("RequestedCount");

    let filter = Filter::new(&filter_text);
    let vfs = service.vfs().lock();

    let container_id = if vfs.get_by_id(requested_id).is_some() {
        requested_id
    } else {
        0
    };

    info!("🔍 Search in #{}: {}", container_id, criteria);

    match vfs.search_direct_children(
        container_id,
        starting_index,
        requested_count,
        &filter,
        &criteria,
    ) {
        Ok(result) => {
            ev.add_response("Result", result.didl);
            ev.add_response("NumberReturned", format!("{:010}", result.number_returned));
            ev.add_response("TotalMatches", format!("{:010}", result.total_matches));
            ev.add_response("UpdateID", format!("{:010}", result.update_id));
        }
        Err(VfsError::NotContainer(_)) => {
            ev.set_error(error_codes::INVALID_CONTAINER, "Invalid container");
        }
        Err(_) => {
            ev.set_error(error_codes::ACTION_FAILED, "Action failed");
        }
    }
}
