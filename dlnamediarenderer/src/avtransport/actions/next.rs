//! Action Next : re-cible `next` sur la piste suivante et déclenche la
//! transition.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, StateChange, TransportState, error_codes};

pub(crate) fn next(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    info!("⏭️ Next #{}", instance.id);
    let change = {
        let mut guard = instance.shared.lock();
        let target = guard.playlist.seek_relative(1);
        guard.playlist.set_next(target);
        instance.change_state_locked(&mut guard, TransportState::Transitioning)
    };

    match change {
        StateChange::Invalid => {
            ev.set_error(error_codes::TRANSITION_NOT_AVAILABLE, "Transition not available");
        }
        // depuis TRANSITIONING le re-ciblage suffit
        StateChange::Unchanged => service.inner().request_event(),
        StateChange::Changed => service.inner().request_event(),
    }
}
