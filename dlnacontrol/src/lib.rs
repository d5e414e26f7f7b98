//! # dlnacontrol - Contrôleur du processus DLNA
//!
//! Cycle de vie complet de la pile :
//!
//! 1. construction ([`Dlna::new`]) : configuration normalisée, chaîne de
//!    handlers HTTP et adresse du serveur partagées ;
//! 2. [`Dlna::start`] : vérification de l'interface réseau, bind de
//!    l'adaptateur UPnP, enregistrement des répertoires virtuels,
//!    publication du descripteur, démarrage du worker d'eventing,
//!    annonce SSDP ;
//! 3. [`Dlna::stop`] : arrêt du worker, extinction des services (threads
//!    de lecture compris), désenregistrement du device.

pub mod config;
mod errors;

use std::sync::Arc;

use dlnastream::web::WebHandlerChain;
use dlnautils::interface_address;
use dlnaupnp::{
    Device, EventingWorker, UpnpAdapter, UpnpDispatcher, UpnpService, register_services_dir,
};
use dlnavfs::ServerLocation;
use tracing::info;

pub use config::{Capabilities, DlnaConfig, Verbosity};
pub use errors::{ConfigError, ControlError};

struct RunningState {
    handle: dlnaupnp::DeviceHandle,
    worker: EventingWorker,
    dispatcher: Arc<UpnpDispatcher>,
}

/// Le contrôleur : possède la configuration, l'adaptateur et le device.
pub struct Dlna {
    config: DlnaConfig,
    adapter: Arc<dyn UpnpAdapter>,
    web: Arc<WebHandlerChain>,
    location: Arc<ServerLocation>,
    device: Option<Arc<Device>>,
    running: Option<RunningState>,
}

impl Dlna {
    /// Construit le contrôleur sur un adaptateur UPnP.
    pub fn new(config: DlnaConfig, adapter: Arc<dyn UpnpAdapter>) -> Self {
        Self {
            config: config.normalized(),
            adapter,
            web: Arc::new(WebHandlerChain::new()),
            location: Arc::new(ServerLocation::new()),
            device: None,
            running: None,
        }
    }

    pub fn config(&self) -> &DlnaConfig {
        &self.config
    }

    /// Chaîne de handlers du serveur d'origine : les protocoles et le
    /// device y enregistrent leurs répertoires virtuels.
    pub fn web(&self) -> &Arc<WebHandlerChain> {
        &self.web
    }

    /// Adresse effective du serveur, renseignée par `start`.
    pub fn location(&self) -> Arc<ServerLocation> {
        self.location.clone()
    }

    /// Attache le device racine. À faire avant `start`.
    pub fn set_device(&mut self, device: Arc<Device>) {
        self.device = Some(device);
    }

    pub fn device(&self) -> Option<&Arc<Device>> {
        self.device.as_ref()
    }

    /// Le dispatcher actif, pour router les évènements de l'adaptateur.
    pub fn dispatcher(&self) -> Option<Arc<UpnpDispatcher>> {
        self.running.as_ref().map(|running| running.dispatcher.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Démarre la pile.
    pub fn start(&mut self) -> Result<(), ControlError> {
        let device = self.device.clone().ok_or(ConfigError::NoDevice)?;

        let ip = interface_address(&self.config.interface)
            .ok_or_else(|| ConfigError::UnknownInterface(self.config.interface.clone()))?;

        info!("🚀 starting UPnP subsystem on {} ({})", self.config.interface, ip);
        let port = self.adapter.init(&ip, self.config.port)?;
        self.location.set(&ip, port);
        info!("UPnP device listening on {}:{}", ip, port);

        self.adapter.enable_webserver(true);
        self.adapter.set_virtual_dir_handlers(self.web.clone());

        register_services_dir(device.clone(), &self.web);
        for service in device.services() {
            service.init(&self.web);
        }
        for prefix in self.web.prefixes() {
            self.adapter.add_virtual_dir(&prefix)?;
        }

        let description = device.description_xml();
        let handle = self.adapter.register_root_device(&description)?;

        let dispatcher = Arc::new(UpnpDispatcher::new(
            device.clone(),
            self.adapter.clone(),
            handle,
        ));
        let worker = EventingWorker::start(device.clone(), self.adapter.clone(), handle);

        info!("📣 sending UPnP advertisement for device ...");
        self.adapter.send_advertisement(handle, 1800)?;

        self.running = Some(RunningState { handle, worker, dispatcher });
        Ok(())
    }

    /// Arrête la pile : worker d'eventing, services, désenregistrement.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        info!("🛑 stopping UPnP A/V service ...");

        running.worker.stop();
        if let Some(device) = &self.device {
            for service in device.services() {
                service.shutdown();
            }
        }
        self.adapter.unregister_root_device(running.handle)?;
        self.adapter.finish();
        Ok(())
    }
}

impl Drop for Dlna {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnaupnp::NullAdapter;
    use dlnaupnp::devices::DEVICE_TYPE_DMS;

    fn dummy_device() -> Arc<Device> {
        Arc::new(Device::new(DEVICE_TYPE_DMS, None, Default::default()))
    }

    #[test]
    fn test_start_requires_device() {
        let mut dlna = Dlna::new(DlnaConfig::default(), Arc::new(NullAdapter::new()));
        assert!(matches!(
            dlna.start(),
            Err(ControlError::Config(ConfigError::NoDevice))
        ));
    }

    #[test]
    fn test_unknown_interface_fails_start() {
        let config = DlnaConfig { interface: "no-such-itf0".to_string(), ..DlnaConfig::default() };
        let mut dlna = Dlna::new(config, Arc::new(NullAdapter::new()));
        dlna.set_device(dummy_device());
        assert!(matches!(
            dlna.start(),
            Err(ControlError::Config(ConfigError::UnknownInterface(_)))
        ));
    }

    #[test]
    fn test_start_and_stop_lifecycle() {
        let mut dlna = Dlna::new(DlnaConfig::default(), Arc::new(NullAdapter::new()));
        dlna.set_device(dummy_device());

        dlna.start().unwrap();
        assert!(dlna.is_running());
        assert!(dlna.dispatcher().is_some());
        // L'adresse du serveur est renseignée après le bind
        let (ip, port) = dlna.location().get();
        assert_eq!(ip, "127.0.0.1");
        assert_ne!(port, 0);

        dlna.stop().unwrap();
        assert!(!dlna.is_running());
    }
}
