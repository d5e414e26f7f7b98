//! Action Seek : seule l'unité `TRACK_NR` est supportée, elle re-cible
//! `next` de ±N pistes. Les autres unités répondent 710.

use dlnaupnp::ActionEvent;
use tracing::info;

use crate::avtransport::actions::resolve_instance;
use crate::avtransport::{AvtsService, error_codes};

pub(crate) fn seek(service: &AvtsService, ev: &mut ActionEvent<'_>) {
    let Some(instance) = resolve_instance(service, ev) else {
        return;
    };

    let unit = ev.get_string("Unit").unwrap_or_default();
    if !unit.starts_with("TRACK_NR") {
        ev.set_error(error_codes::NOT_IMPLEMENTED, "Seek mode not implemented");
        return;
    }

    let target = ev
        .get_string("Target")
        .and_then(|text| text.trim().parse::<i64>().ok())
        .unwrap_or(0);

    info!("⏩ Seek #{} TRACK_NR {:+}", instance.id, target);
    let mut guard = instance.shared.lock();
    let index = guard.playlist.seek_relative(target);
    guard.playlist.set_next(index);
}
