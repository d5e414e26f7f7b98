//! Action GetFeatureList.

use dlnaupnp::{ActionEvent, UpnpService};

use crate::contentdirectory::CdsService;

pub(crate) fn get_feature_list(service: &CdsService, ev: &mut ActionEvent<'_>) {
    let features = service.get_variable("FeatureList").unwrap_or_default();
    ev.add_response("FeatureList", features);
}
