//! Action GetCurrentConnectionIDs : aucune connexion suivie.

use dlnaupnp::ActionEvent;

use crate::connectionmanager::CmsService;

pub(crate) fn get_current_connection_ids(_service: &CmsService, ev: &mut ActionEvent<'_>) {
    ev.add_response("ConnectionIDs", "");
}
