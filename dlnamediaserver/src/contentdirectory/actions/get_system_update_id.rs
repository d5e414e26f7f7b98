//! Action GetSystemUpdateID : polling du compteur de mutations.

use dlnaupnp::{ActionEvent, UpnpService};

use crate::contentdirectory::CdsService;

pub(crate) fn get_system_update_id(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let id = service.get_variable("SystemUpdateID").unwrap_or_default();
    ev.add_response("Id", id);
}
