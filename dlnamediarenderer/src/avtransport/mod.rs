//! # AVTransport:1 et moteur de lecture
//!
//! Machine d'états de transport multi-instances. L'instance 0 existe dès
//! la création du service ; `Stop` sur une instance non nulle la détruit
//! après avoir joint son thread de lecture. Chaque transition validée
//! planifie un évènement GENA sur la variable `LastChange`.
//!
//! ## Table de transitions
//!
//! ```text
//!              SetURI        Play     Stop      Pause     Next/Prev
//! NO_MEDIA     → STOPPED     701      701       701       701
//! STOPPED      vide+rebuffer → PLAYING no-op    701       701
//! PLAYING      append        no-op    → STOPPED → PAUSED  → TRANSITIONING
//! PAUSED       append        → PLAYING → STOPPED no-op    701
//! TRANSITIONING append       701      → STOPPED → PAUSED  re-cible next
//! ```
//!
//! Le thread de lecture applique les fins de piste : `read_frame`
//! épuisé → TRANSITIONING ; piste terminée avec une suivante → avance ;
//! sans suivante → STOPPED.

pub mod actions;
mod instance;
mod lastchange;
mod playback;
mod playlist;
pub mod variables;

use std::collections::HashMap;
use std::sync::Arc;

use dlnaprofiler::ProfilerRegistry;
use dlnaupnp::{ActionEvent, ServiceDefinition, UpnpService};
use parking_lot::RwLock;
use tracing::{debug, info};

pub use instance::{AvtsInstance, InstanceState, StateChange, TransportState};
pub use playlist::{Playlist, PlaylistEntry};

pub const AVTS_SERVICE_ID: &str = "urn:upnp-org:serviceId:AVTransport";
pub const AVTS_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:AVTransport:1";

/// Codes d'erreur SOAP de l'AVTransport.
pub(crate) mod error_codes {
    pub const ACTION_FAILED: u32 = 501;
    pub const TRANSITION_NOT_AVAILABLE: u32 = 701;
    pub const NO_CONTENTS: u32 = 702;
    pub const NOT_IMPLEMENTED: u32 = 710;
    pub const ILLEGAL_MIME: u32 = 714;
    pub const SPEED_NOT_SUPPORTED: u32 = 717;
    pub const INVALID_INSTANCE: u32 = 718;
}

/// Partie partagée du service : définition, profilers, instances.
pub(crate) struct AvtsInner {
    pub(crate) definition: ServiceDefinition,
    pub(crate) registry: Arc<ProfilerRegistry>,
    pub(crate) instances: RwLock<HashMap<u32, Arc<AvtsInstance>>>,
}

impl AvtsInner {
    /// Planifie un évènement LastChange.
    pub(crate) fn request_event(&self) {
        if let Some(variable) = self.definition.find_variable("LastChange") {
            variable.request_event();
        }
    }
}

/// Service AVTransport.
pub struct AvtsService {
    inner: Arc<AvtsInner>,
}

impl AvtsService {
    /// Crée le service et son instance 0.
    pub fn new(registry: Arc<ProfilerRegistry>) -> Self {
        let service = Self {
            inner: Arc::new(AvtsInner {
                definition: ServiceDefinition::new(
                    AVTS_SERVICE_ID,
                    AVTS_SERVICE_TYPE,
                    "avts.xml",
                    "avts_control",
                    "avts_event",
                    actions::action_table(),
                    variables::variable_table(),
                ),
                registry,
                instances: RwLock::new(HashMap::new()),
            }),
        };
        service.create_instance(0);
        service
    }

    pub fn instance(&self, id: u32) -> Option<Arc<AvtsInstance>> {
        self.inner.instances.read().get(&id).cloned()
    }

    /// Crée une instance et démarre son thread de lecture.
    pub fn create_instance(&self, id: u32) -> Arc<AvtsInstance> {
        let instance = Arc::new(AvtsInstance::new(id));
        let thread_instance = instance.clone();
        let thread_inner = self.inner.clone();
        let handle = std::thread::Builder::new()
            .name(format!("avts-play-{id}"))
            .spawn(move || playback::playback_loop(thread_instance, thread_inner))
            .expect("cannot spawn playback thread");
        *instance.thread.lock() = Some(handle);

        info!("🎚️ transport instance #{} created", id);
        self.inner.instances.write().insert(id, instance.clone());
        instance
    }

    /// Arrête une instance : SHUTDOWN, signal, jointure du thread, purge
    /// de la playlist, retrait du registre.
    pub fn kill_instance(&self, id: u32) {
        let Some(instance) = self.inner.instances.write().remove(&id) else {
            return;
        };
        {
            let mut guard = instance.shared.lock();
            guard.state = TransportState::Shutdown;
            instance.state_change.notify_all();
        }
        if let Some(handle) = instance.thread.lock().take() {
            let _ = handle.join();
        }
        instance.shared.lock().playlist.clear();
        debug!("transport instance #{} destroyed", id);
    }

    /// Compose le document `LastChange` de toutes les instances.
    pub fn last_change(&self) -> String {
        lastchange::compose(&self.inner.instances.read())
    }

    pub(crate) fn inner(&self) -> &Arc<AvtsInner> {
        &self.inner
    }
}

impl UpnpService for AvtsService {
    fn definition(&self) -> &ServiceDefinition {
        &self.inner.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            "SetAVTransportURI" => actions::set_avtransport_uri(self, ev),
            "SetNextAVTransportURI" => actions::set_next_avtransport_uri(self, ev),
            "GetMediaInfo" => actions::get_media_info(self, ev, false),
            "GetMediaInfo_Ext" => actions::get_media_info(self, ev, true),
            "GetTransportInfo" => actions::get_transport_info(self, ev),
            "GetPositionInfo" => actions::get_position_info(self, ev),
            "GetDeviceCapabilities" => actions::get_device_capabilities(self, ev),
            "GetTransportSettings" => actions::get_transport_settings(self, ev),
            "GetCurrentTransportActions" => actions::get_current_transport_actions(self, ev),
            "Stop" => actions::stop(self, ev),
            "Play" => actions::play(self, ev),
            "Pause" => actions::pause(self, ev),
            "Seek" => actions::seek(self, ev),
            "Next" => actions::next(self, ev),
            "Previous" => actions::previous(self, ev),
            "Record" | "SetPlayMode" | "SetRecordQualityMode" => {
                ev.set_error(error_codes::ACTION_FAILED, "Not implemented")
            }
            _ => ev.set_error(401, "Invalid Action"),
        }
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        match name {
            "LastChange" => Some(self.last_change()),
            _ => None,
        }
    }

    fn shutdown(&self) {
        let ids: Vec<u32> = self.inner.instances.read().keys().copied().collect();
        for id in ids {
            self.kill_instance(id);
        }
    }
}
