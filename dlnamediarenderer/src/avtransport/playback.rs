//! Thread de lecture d'une instance AVTransport.
//!
//! La boucle lit l'état sous le verrou d'instance et :
//!
//! - `NO_MEDIA` : attend sur la condvar qu'une playlist apparaisse ou
//!   que l'état change, puis prépare la première piste ;
//! - `STOPPED` : ferme la piste courante, attend la sortie de STOPPED,
//!   rembobine la playlist et prépare la première piste ;
//! - `PAUSED` : attend sur la condvar ;
//! - `PLAYING`/`TRANSITIONING` : décode une trame via le profil,
//!   incrémente le compteur de lecture et applique la table de
//!   transitions ; chaque transition décidée ici planifie un évènement
//!   GENA.
//!
//! Le décodage se fait hors du verrou d'instance (seul le verrou de
//! l'item est tenu) : les actions SOAP restent servies pendant une trame
//! longue.

use std::sync::Arc;

use dlnaprofiler::{FrameStatus, MediaItem};
use dlnastream::stream_open;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::AvtsInner;
use super::instance::{AvtsInstance, InstanceState, TransportState};

/// Ouvre le flux d'une piste et prépare son décodage.
pub(crate) fn prepare_item(item: &Arc<Mutex<MediaItem>>) {
    let mut item = item.lock();
    let profile = item.profile().clone();
    if !profile.playable() {
        return;
    }
    if item.stream.is_none() {
        match stream_open(item.filename()) {
            Ok(stream) => item.stream = Some(stream),
            Err(e) => {
                warn!("cannot open {}: {}", item.filename(), e);
                return;
            }
        }
    }
    if let Err(e) = profile.prepare_stream(&mut item) {
        warn!("prepare failed for {}: {}", item.filename(), e);
    }
}

/// Décode la trame suivante d'une piste.
fn decode_item(item: &Arc<Mutex<MediaItem>>) -> FrameStatus {
    let mut item = item.lock();
    let profile = item.profile().clone();
    if !profile.playable() {
        return FrameStatus::Finished;
    }
    profile.read_frame(&mut item)
}

/// Clôt le décodage et ferme le flux d'une piste.
pub(crate) fn close_item(item: &Arc<Mutex<MediaItem>>) {
    let mut item = item.lock();
    let profile = item.profile().clone();
    profile.close_stream(&mut item);
    item.stream = None;
}

/// Corps du thread de lecture.
pub(crate) fn playback_loop(instance: Arc<AvtsInstance>, inner: Arc<AvtsInner>) {
    debug!("▶️ playback thread up for instance #{}", instance.id);
    loop {
        let state = instance.state();
        match state {
            TransportState::Shutdown => break,
            TransportState::Playing | TransportState::Transitioning => {
                play_one_frame(&instance, &inner, state);
            }
            TransportState::NoMedia => {
                let prepared = {
                    let mut guard = instance.shared.lock();
                    while guard.playlist.is_empty() && guard.state == TransportState::NoMedia {
                        instance.state_change.wait(&mut guard);
                    }
                    if guard.state == TransportState::Shutdown {
                        continue;
                    }
                    guard.playlist.current_entry().map(|entry| entry.item.clone())
                };
                if let Some(item) = prepared {
                    prepare_item(&item);
                }
                instance.reset_counter();
            }
            TransportState::Stopped => {
                let closing = {
                    let guard = instance.shared.lock();
                    if guard.playlist.is_empty() {
                        None
                    } else {
                        guard.playlist.current_entry().map(|entry| entry.item.clone())
                    }
                };

                let empty = {
                    let guard = instance.shared.lock();
                    guard.playlist.is_empty()
                };
                if empty {
                    // plus rien à jouer : retour à NO_MEDIA
                    if instance.change_state(TransportState::NoMedia) == super::instance::StateChange::Changed {
                        inner.request_event();
                    }
                    continue;
                }

                if let Some(item) = closing {
                    close_item(&item);
                }

                let prepared = {
                    let mut guard = instance.shared.lock();
                    while guard.state == TransportState::Stopped {
                        instance.state_change.wait(&mut guard);
                    }
                    if guard.state == TransportState::Shutdown {
                        continue;
                    }
                    guard.playlist.rewind();
                    guard.playlist.current_entry().map(|entry| entry.item.clone())
                };
                if let Some(item) = prepared {
                    prepare_item(&item);
                }
                instance.reset_counter();
            }
            TransportState::Pausing | TransportState::Recording => {
                let mut guard = instance.shared.lock();
                while guard.state == state {
                    instance.state_change.wait(&mut guard);
                }
            }
        }
    }
    debug!("⏹️ playback thread down for instance #{}", instance.id);
}

/// Lit une trame et applique la table de transitions.
fn play_one_frame(instance: &Arc<AvtsInstance>, inner: &Arc<AvtsInner>, state: TransportState) {
    let current = {
        let guard = instance.shared.lock();
        if guard.state != state {
            return;
        }
        guard.playlist.current_entry().map(|entry| entry.item.clone())
    };

    let Some(item) = current else {
        // pas de piste courante : la transition retombe en STOPPED
        let mut guard = instance.shared.lock();
        if matches!(guard.state, TransportState::Playing | TransportState::Transitioning) {
            guard.state = TransportState::Stopped;
            instance.state_change.notify_all();
            inner.request_event();
        }
        return;
    };

    let status = decode_item(&item);
    instance.bump_counter();

    let mut guard = instance.shared.lock();
    match status {
        FrameStatus::Running => {
            if guard.state == TransportState::Transitioning {
                // transition demandée par le point de contrôle
                complete_transition(instance, inner, &mut guard, Some(&item));
            }
        }
        FrameStatus::Finishing => {
            if guard.state == TransportState::Playing {
                guard.state = TransportState::Transitioning;
                instance.state_change.notify_all();
                inner.request_event();
            } else if guard.state == TransportState::Transitioning {
                complete_transition(instance, inner, &mut guard, Some(&item));
            }
        }
        FrameStatus::Finished => match guard.state {
            TransportState::Playing => {
                if guard.playlist.next_index().is_some() {
                    // enchaînement direct sur la piste suivante
                    let closing = item.clone();
                    guard.playlist.advance();
                    let opening =
                        guard.playlist.current_entry().map(|entry| entry.item.clone());
                    drop(guard);
                    close_item(&closing);
                    if let Some(next_item) = opening {
                        prepare_item(&next_item);
                    }
                    instance.reset_counter();
                } else {
                    guard.state = TransportState::Stopped;
                    instance.state_change.notify_all();
                    inner.request_event();
                }
            }
            TransportState::Transitioning => {
                complete_transition(instance, inner, &mut guard, Some(&item));
            }
            _ => {}
        },
    }
}

/// Achève une transition : avance sur `next` et repart en lecture, ou
/// s'arrête quand il n'y a pas de piste suivante. Dans les deux cas un
/// évènement LastChange est planifié.
fn complete_transition(
    instance: &Arc<AvtsInstance>,
    inner: &Arc<AvtsInner>,
    guard: &mut parking_lot::MutexGuard<'_, InstanceState>,
    closing: Option<&Arc<Mutex<MediaItem>>>,
) {
    if guard.playlist.next_index().is_none() {
        guard.state = TransportState::Stopped;
        instance.state_change.notify_all();
        inner.request_event();
        return;
    }

    guard.playlist.advance();
    let opening = guard.playlist.current_entry().map(|entry| entry.item.clone());
    guard.state = TransportState::Playing;
    instance.state_change.notify_all();

    let closing = closing.cloned();
    parking_lot::MutexGuard::unlocked(guard, || {
        if let Some(item) = closing {
            close_item(&item);
        }
        if let Some(item) = opening {
            prepare_item(&item);
        }
    });
    instance.reset_counter();
    inner.request_event();
}
