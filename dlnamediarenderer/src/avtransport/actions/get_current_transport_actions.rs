//! Action GetCurrentTransportActions.

use dlnaupnp::ActionEvent;

use crate::avtransport::AvtsService;
use crate::avtransport::actions::resolve_instance;

pub(crate) fn get_current_transport_actions(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };
    ev.add_response("Actions", instance.possible_actions());
}
