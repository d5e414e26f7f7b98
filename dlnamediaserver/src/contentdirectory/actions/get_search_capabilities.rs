//! Action GetSearchCapabilities.

use dlnaupnp::{ActionEvent, UpnpService};

use crate::contentdirectory::CdsService;

pub(crate) fn get_search_capabilities(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let caps = service.get_variable("SearchCapabilities").unwrap_or_default();
    ev.add_response("SearchCaps", caps);
}
