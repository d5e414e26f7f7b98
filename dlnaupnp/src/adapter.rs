//! Interface étroite vers la pile UPnP externe (SSDP/SOAP/GENA).
//!
//! Le cœur ne parle jamais au réseau directement : il consomme la pile
//! hôte à travers [`UpnpAdapter`] et reçoit d'elle les évènements
//! entrants ([`UpnpEvent`]). Le [`NullAdapter`] fourni journalise sans
//! réseau ; il sert aux tests et aux binaires de démonstration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dlnastream::web::WebHandlerChain;
use tracing::{debug, info};
use xmltree::Element;

use crate::errors::UpnpError;

/// Poignée opaque du device enregistré auprès de la pile.
pub type DeviceHandle = u64;

/// Jeu de propriétés GENA : paires (variable, valeur). L'enrobage XML
/// `e:propertyset` est l'affaire de l'adaptateur.
pub type PropertySet = Vec<(String, String)>;

/// Demande d'abonnement GENA entrante.
#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub udn: String,
    pub service_id: String,
    pub sid: String,
}

/// Requête d'action SOAP entrante. `request` est l'élément DOM de
/// l'action, ses enfants sont les arguments.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub dev_udn: String,
    pub service_id: String,
    pub action_name: String,
    pub request: Element,
}

/// Interrogation directe d'une variable d'état.
#[derive(Debug, Clone)]
pub struct StateVarRequest {
    pub dev_udn: String,
    pub service_id: String,
    pub var_name: String,
}

/// Évènements remontés par la pile UPnP.
#[derive(Debug, Clone)]
pub enum UpnpEvent {
    SubscriptionRequest(SubscriptionRequest),
    ActionRequest(ActionRequest),
    StateVarRequest(StateVarRequest),
    ActionComplete,
}

/// L'interface que la pile UPnP hôte doit fournir.
pub trait UpnpAdapter: Send + Sync {
    /// Lie la pile à une adresse ; retourne le port effectif.
    fn init(&self, ip: &str, port: u16) -> Result<u16, UpnpError>;

    fn enable_webserver(&self, enable: bool);

    /// Déclare un répertoire virtuel du serveur d'origine.
    fn add_virtual_dir(&self, prefix: &str) -> Result<(), UpnpError>;

    /// Installe la chaîne de handlers qui résout les URLs des
    /// répertoires virtuels en flux.
    fn set_virtual_dir_handlers(&self, handlers: Arc<WebHandlerChain>);

    /// Publie le descripteur et enregistre le device racine.
    fn register_root_device(&self, description_xml: &str) -> Result<DeviceHandle, UpnpError>;

    fn unregister_root_device(&self, handle: DeviceHandle) -> Result<(), UpnpError>;

    /// Annonce SSDP périodique.
    fn send_advertisement(&self, handle: DeviceHandle, seconds: u32) -> Result<(), UpnpError>;

    /// Notification GENA d'un jeu de variables d'un service.
    fn notify_ext(
        &self,
        handle: DeviceHandle,
        udn: &str,
        service_id: &str,
        property_set: &PropertySet,
    ) -> Result<(), UpnpError>;

    /// Accepte un abonnement en livrant l'état initial des variables.
    fn accept_subscription_ext(
        &self,
        handle: DeviceHandle,
        udn: &str,
        service_id: &str,
        property_set: &PropertySet,
        sid: &str,
    ) -> Result<(), UpnpError>;

    /// Libération finale de la pile.
    fn finish(&self) {}
}

/// Adaptateur sans réseau : journalise chaque appel et accepte tout.
///
/// La pile UPnP réelle est un collaborateur externe ; ce remplaçant
/// permet d'exercer dispatcher, eventing et cycle de vie sans elle.
#[derive(Default)]
pub struct NullAdapter {
    next_handle: AtomicU64,
}

impl NullAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UpnpAdapter for NullAdapter {
    fn init(&self, ip: &str, port: u16) -> Result<u16, UpnpError> {
        let bound = if port == 0 { 49152 } else { port };
        info!("🔌 upnp adapter bound on {}:{}", ip, bound);
        Ok(bound)
    }

    fn enable_webserver(&self, enable: bool) {
        debug!("webserver enabled: {}", enable);
    }

    fn add_virtual_dir(&self, prefix: &str) -> Result<(), UpnpError> {
        debug!("virtual dir: {}", prefix);
        Ok(())
    }

    fn set_virtual_dir_handlers(&self, _handlers: Arc<WebHandlerChain>) {}

    fn register_root_device(&self, _description_xml: &str) -> Result<DeviceHandle, UpnpError> {
        Ok(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn unregister_root_device(&self, handle: DeviceHandle) -> Result<(), UpnpError> {
        debug!("unregister device #{}", handle);
        Ok(())
    }

    fn send_advertisement(&self, handle: DeviceHandle, seconds: u32) -> Result<(), UpnpError> {
        info!("📣 advertisement for device #{} ({}s)", handle, seconds);
        Ok(())
    }

    fn notify_ext(
        &self,
        _handle: DeviceHandle,
        _udn: &str,
        service_id: &str,
        property_set: &PropertySet,
    ) -> Result<(), UpnpError> {
        debug!("notify {}: {} variable(s)", service_id, property_set.len());
        Ok(())
    }

    fn accept_subscription_ext(
        &self,
        _handle: DeviceHandle,
        _udn: &str,
        service_id: &str,
        property_set: &PropertySet,
        sid: &str,
    ) -> Result<(), UpnpError> {
        debug!(
            "subscription {} on {}: {} variable(s)",
            sid,
            service_id,
            property_set.len()
        );
        Ok(())
    }
}
