//! Action Pause.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, StateChange, TransportState, error_codes};

pub(crate) fn pause(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    info!("⏸️ Pause #{}", instance.id);
    match instance.change_state(TransportState::Pausing) {
        StateChange::Invalid => {
            ev.set_error(error_codes::TRANSITION_NOT_AVAILABLE, "Transition not available");
        }
        StateChange::Unchanged => {}
        StateChange::Changed => service.inner().request_event(),
    }
}
