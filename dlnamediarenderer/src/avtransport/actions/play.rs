//! Action Play.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, StateChange, TransportState, error_codes};

/// Seule la vitesse 1 est supportée (717 sinon). La transition vers
/// PLAYING suit la table ; une playlist vide répond 702.
pub(crate) fn play(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    let speed = ev
        .get_string("Speed")
        .and_then(|text| text.trim().parse::<i32>().ok())
        .unwrap_or(1);
    if speed != 1 {
        ev.set_error(error_codes::SPEED_NOT_SUPPORTED, "Play speed not supported");
        return;
    }

    info!("▶️ Play #{}", instance.id);
    match instance.change_state(TransportState::Playing) {
        StateChange::Invalid => {
            ev.set_error(error_codes::TRANSITION_NOT_AVAILABLE, "Transition not available");
        }
        StateChange::Unchanged => {}
        StateChange::Changed => {
            if instance.shared.lock().playlist.is_empty() {
                ev.set_error(error_codes::NO_CONTENTS, "No contents");
                return;
            }
            service.inner().request_event();
        }
    }
}
