//! Worker d'eventing périodique.
//!
//! Un thread unique se réveille toutes les 200 ms (ou sur signal) et,
//! pour chaque service, rassemble dans un seul property set toutes les
//! variables évènementielles dont le compteur dépasse le `last_change`
//! du service, les notifie via l'adaptateur puis avance `last_change` au
//! maximum observé.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use crate::adapter::{DeviceHandle, PropertySet, UpnpAdapter};
use crate::devices::Device;
use crate::services::UpnpService;

const EVENTING_PERIOD: Duration = Duration::from_millis(200);

struct Shared {
    running: Mutex<bool>,
    wakeup: Condvar,
}

/// Le thread d'eventing et sa poignée d'arrêt.
pub struct EventingWorker {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl EventingWorker {
    /// Démarre le worker sur un device enregistré.
    pub fn start(
        device: Arc<Device>,
        adapter: Arc<dyn UpnpAdapter>,
        handle: DeviceHandle,
    ) -> Self {
        let shared = Arc::new(Shared { running: Mutex::new(true), wakeup: Condvar::new() });
        let thread_shared = shared.clone();

        let thread = std::thread::Builder::new()
            .name("dlna-eventing".to_string())
            .spawn(move || {
                loop {
                    {
                        let mut running = thread_shared.running.lock();
                        if !*running {
                            break;
                        }
                        thread_shared
                            .wakeup
                            .wait_for(&mut running, EVENTING_PERIOD);
                        if !*running {
                            break;
                        }
                    }
                    let udn = device.udn();
                    for service in device.services() {
                        notify_service(&udn, service, adapter.as_ref(), handle);
                    }
                }
                debug!("eventing worker stopped");
            })
            .expect("cannot spawn eventing thread");

        Self { shared, thread: Some(thread) }
    }

    /// Réveille le worker sans attendre la période.
    pub fn signal(&self) {
        self.shared.wakeup.notify_all();
    }

    /// Arrête le worker et attend la fin du thread.
    pub fn stop(mut self) {
        {
            let mut running = self.shared.running.lock();
            *running = false;
        }
        self.shared.wakeup.notify_all();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Notifie les variables en retard d'un service, en un seul property set.
fn notify_service(
    udn: &str,
    service: &Arc<dyn UpnpService>,
    adapter: &dyn UpnpAdapter,
    handle: DeviceHandle,
) {
    let definition = service.definition();
    let last_change = definition.last_change();

    let mut property_set: PropertySet = Vec::new();
    let mut max_seen = last_change;
    for variable in &definition.variables {
        if !variable.evented {
            continue;
        }
        let eventing = variable.eventing();
        if eventing <= last_change {
            continue;
        }
        if let Some(value) = service.get_variable(variable.name) {
            property_set.push((variable.name.to_string(), value));
            max_seen = max_seen.max(eventing);
        }
    }

    if max_seen <= last_change {
        return;
    }

    definition.set_last_change(max_seen);
    for variable in &definition.variables {
        if variable.evented && variable.eventing() > 0 && variable.eventing() < max_seen {
            variable.set_eventing(max_seen);
        }
    }

    if !property_set.is_empty() {
        debug!(
            "🔔 notify {}: {} variable(s)",
            definition.id,
            property_set.len()
        );
        if let Err(e) = adapter.notify_ext(handle, udn, &definition.id, &property_set) {
            warn!("event notify error: {}", e);
        }
    }
}
