//! Action Stop.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, StateChange, TransportState, error_codes};

/// Stop d'une instance non nulle : l'instance est détruite après la
/// jointure de son thread de lecture.
pub(crate) fn stop(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    info!("⏹️ Stop #{}", instance.id);
    match instance.change_state(TransportState::Stopped) {
        StateChange::Invalid => {
            ev.set_error(error_codes::TRANSITION_NOT_AVAILABLE, "Transition not available");
            return;
        }
        StateChange::Unchanged => {}
        StateChange::Changed => service.inner().request_event(),
    }

    if instance.id > 0 {
        service.kill_instance(instance.id);
    }
}
