//! Action GetSortCapabilities.

use dlnaupnp::{ActionEvent, UpnpService};

use crate::contentdirectory::CdsService;

pub(crate) fn get_sort_capabilities(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let caps = service.get_variable("SortCapabilities").unwrap_or_default();
    ev.add_response("SortCaps", caps);
}
