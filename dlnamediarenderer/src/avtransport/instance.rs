//! Instance AVTransport : état de transport + playlist sous un même
//! verrou, condvar de changement d'état, thread de lecture.

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use super::playlist::Playlist;

/// États de la machine de transport. `Shutdown` est interne et terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    NoMedia,
    Stopped,
    Playing,
    Pausing,
    Recording,
    Transitioning,
    Shutdown,
}

impl TransportState {
    /// Libellé UPnP de l'état.
    pub fn as_upnp(&self) -> &'static str {
        match self {
            TransportState::NoMedia => "NO_MEDIA_PRESENT",
            TransportState::Stopped | TransportState::Shutdown => "STOPPED",
            TransportState::Playing => "PLAYING",
            TransportState::Pausing => "PAUSED_PLAYBACK",
            TransportState::Recording => "RECORDING",
            TransportState::Transitioning => "TRANSITIONING",
        }
    }
}

/// Issue d'une demande de transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// La transition a eu lieu (un évènement doit suivre).
    Changed,
    /// Déjà dans l'état demandé : no-op, pas d'évènement.
    Unchanged,
    /// Transition interdite par la table (erreur 701).
    Invalid,
}

/// État partagé d'une instance, sous le verrou.
pub struct InstanceState {
    pub state: TransportState,
    pub playlist: Playlist,
}

impl InstanceState {
    /// Actions de transport possibles dans l'état courant.
    pub fn possible_actions(&self) -> String {
        match self.state {
            TransportState::NoMedia | TransportState::Recording | TransportState::Shutdown => {
                "NONE".to_string()
            }
            TransportState::Stopped => "PLAY".to_string(),
            TransportState::Pausing => "STOP,PLAY".to_string(),
            TransportState::Playing | TransportState::Transitioning => {
                let mut actions = String::from("STOP,PAUSE,SEEK");
                if self.playlist.successor().is_some() {
                    actions.push_str(",NEXT");
                }
                if self.playlist.previous_exists() {
                    actions.push_str(",PREVIOUS");
                }
                actions
            }
        }
    }
}

/// Instance de transport. L'instance 0 existe toujours ; les autres sont
/// créées à la demande et détruites par Stop ou à l'arrêt du service.
pub struct AvtsInstance {
    pub id: u32,
    pub shared: Mutex<InstanceState>,
    pub state_change: Condvar,
    /// Compteur monotone de trames lues sur la piste courante.
    pub counter: AtomicU32,
    pub(crate) thread: Mutex<Option<JoinHandle<()>>>,
}

impl AvtsInstance {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            shared: Mutex::new(InstanceState {
                state: TransportState::NoMedia,
                playlist: Playlist::new(),
            }),
            state_change: Condvar::new(),
            counter: AtomicU32::new(0),
            thread: Mutex::new(None),
        }
    }

    pub fn state(&self) -> TransportState {
        self.shared.lock().state
    }

    pub fn counter_value(&self) -> u32 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.counter.store(0, Ordering::SeqCst);
    }

    pub fn bump_counter(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Demande de transition externe (actions SOAP), sérialisée par le
    /// verrou d'état. Seules les transitions de la table sont permises ;
    /// re-demander l'état courant est un no-op.
    pub fn change_state(&self, new_state: TransportState) -> StateChange {
        let mut guard = self.shared.lock();
        self.change_state_locked(&mut guard, new_state)
    }

    pub(crate) fn change_state_locked(
        &self,
        guard: &mut InstanceState,
        new_state: TransportState,
    ) -> StateChange {
        use TransportState::*;

        let current = guard.state;
        if current == Shutdown {
            return StateChange::Invalid;
        }
        if current == new_state {
            return StateChange::Unchanged;
        }

        let allowed = match new_state {
            // retombée interne d'un STOPPED sans playlist
            NoMedia => current != NoMedia,
            Stopped => current != NoMedia,
            Playing => matches!(current, Stopped | Pausing),
            Pausing => matches!(current, Playing | Transitioning),
            Transitioning => matches!(current, Playing),
            // l'enregistrement n'est pas supporté
            Recording => false,
            Shutdown => true,
        };
        if !allowed {
            return StateChange::Invalid;
        }

        guard.state = new_state;
        self.state_change.notify_all();
        StateChange::Changed
    }

    /// Actions de transport possibles dans l'état courant.
    pub fn possible_actions(&self) -> String {
        self.shared.lock().possible_actions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_media_blocks_transport_verbs() {
        let instance = AvtsInstance::new(0);
        assert_eq!(instance.change_state(TransportState::Playing), StateChange::Invalid);
        assert_eq!(instance.change_state(TransportState::Stopped), StateChange::Invalid);
        assert_eq!(instance.change_state(TransportState::Pausing), StateChange::Invalid);
    }

    #[test]
    fn test_valid_walk() {
        let instance = AvtsInstance::new(0);
        // SetURI fait NO_MEDIA → STOPPED directement
        instance.shared.lock().state = TransportState::Stopped;

        assert_eq!(instance.change_state(TransportState::Playing), StateChange::Changed);
        assert_eq!(instance.change_state(TransportState::Playing), StateChange::Unchanged);
        assert_eq!(instance.change_state(TransportState::Pausing), StateChange::Changed);
        assert_eq!(instance.change_state(TransportState::Playing), StateChange::Changed);
        assert_eq!(
            instance.change_state(TransportState::Transitioning),
            StateChange::Changed
        );
        assert_eq!(instance.change_state(TransportState::Pausing), StateChange::Changed);
        assert_eq!(instance.change_state(TransportState::Stopped), StateChange::Changed);
        assert_eq!(instance.change_state(TransportState::Stopped), StateChange::Unchanged);
    }

    #[test]
    fn test_invalid_transitions() {
        let instance = AvtsInstance::new(0);
        instance.shared.lock().state = TransportState::Stopped;

        // Pause et Next depuis STOPPED sont interdits
        assert_eq!(instance.change_state(TransportState::Pausing), StateChange::Invalid);
        assert_eq!(
            instance.change_state(TransportState::Transitioning),
            StateChange::Invalid
        );
        // L'enregistrement n'est jamais accessible
        assert_eq!(instance.change_state(TransportState::Recording), StateChange::Invalid);
    }

    #[test]
    fn test_possible_actions_by_state() {
        let instance = AvtsInstance::new(0);
        assert_eq!(instance.possible_actions(), "NONE");

        instance.shared.lock().state = TransportState::Stopped;
        assert_eq!(instance.possible_actions(), "PLAY");

        instance.shared.lock().state = TransportState::Pausing;
        assert_eq!(instance.possible_actions(), "STOP,PLAY");

        instance.shared.lock().state = TransportState::Playing;
        assert_eq!(instance.possible_actions(), "STOP,PAUSE,SEEK");
    }
}
