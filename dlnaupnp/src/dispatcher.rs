//! Dispatcher des évènements UPnP entrants.
//!
//! Appelé séquentiellement par le thread de l'adaptateur, il résout
//! chaque évènement contre les tables des services du device :
//!
//! - *abonnement* : l'état initial de chaque variable évènementielle est
//!   calculé et livré dans le property set d'acceptation ;
//! - *action* : service par id, action par parcours linéaire de la
//!   table, exécution du callback ; une réponse vide par défaut est
//!   synthétisée quand le callback n'a rien produit ;
//! - *variable d'état* : dispatch sur la fonction `get` de la variable.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapter::{
    ActionRequest, DeviceHandle, StateVarRequest, SubscriptionRequest, UpnpAdapter, UpnpEvent,
};
use crate::devices::Device;
use crate::services::{ActionEvent, UpnpService};

/// Code SOAP d'une action inconnue ou non implémentée.
const SOAP_ERR_INVALID_ACTION: u32 = 401;

/// Résultat d'une requête d'action, prêt pour l'enveloppe SOAP.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub action: String,
    pub responses: Vec<(String, String)>,
    pub error: Option<(u32, String)>,
}

impl ActionOutcome {
    fn error(action: &str, code: u32, message: &str) -> Self {
        Self {
            action: action.to_string(),
            responses: Vec::new(),
            error: Some((code, message.to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatcher lié à un device et à son adaptateur.
pub struct UpnpDispatcher {
    device: Arc<Device>,
    adapter: Arc<dyn UpnpAdapter>,
    handle: DeviceHandle,
}

impl UpnpDispatcher {
    pub fn new(device: Arc<Device>, adapter: Arc<dyn UpnpAdapter>, handle: DeviceHandle) -> Self {
        Self { device, adapter, handle }
    }

    /// Point d'entrée unique pour l'adaptateur.
    pub fn dispatch(&self, event: UpnpEvent) -> Option<ActionOutcome> {
        match event {
            UpnpEvent::SubscriptionRequest(request) => {
                self.on_subscription_request(&request);
                None
            }
            UpnpEvent::ActionRequest(request) => Some(self.on_action_request(&request)),
            UpnpEvent::StateVarRequest(request) => {
                self.on_state_var_request(&request);
                None
            }
            UpnpEvent::ActionComplete => None,
        }
    }

    /// Livraison de l'état initial d'un abonnement GENA.
    pub fn on_subscription_request(&self, request: &SubscriptionRequest) {
        let Some(service) = self.device.find_service(&request.service_id) else {
            warn!("subscription for unknown service {}", request.service_id);
            return;
        };

        let mut property_set = Vec::new();
        for variable in &service.definition().variables {
            if !variable.evented {
                continue;
            }
            if let Some(value) = service.get_variable(variable.name) {
                property_set.push((variable.name.to_string(), value));
            }
        }

        if let Err(e) = self.adapter.accept_subscription_ext(
            self.handle,
            &request.udn,
            &request.service_id,
            &property_set,
            &request.sid,
        ) {
            warn!("subscription error: {}", e);
        }
    }

    /// Exécution d'une action SOAP.
    pub fn on_action_request(&self, request: &ActionRequest) -> ActionOutcome {
        // la cible doit être notre device
        if request.dev_udn != self.device.udn() {
            return ActionOutcome::error(
                &request.action_name,
                SOAP_ERR_INVALID_ACTION,
                "Unknown Device UDN",
            );
        }

        info!(
            "⚙️ action {} on {}",
            request.action_name, request.service_id
        );

        let Some(service) = self.device.find_service(&request.service_id) else {
            return ActionOutcome::error(
                &request.action_name,
                SOAP_ERR_INVALID_ACTION,
                "Unknown Service ID",
            );
        };

        let Some(action) = service.definition().find_action(&request.action_name) else {
            return ActionOutcome::error(
                &request.action_name,
                SOAP_ERR_INVALID_ACTION,
                "Unknown Service Action",
            );
        };
        if !action.implemented {
            return ActionOutcome::error(
                &request.action_name,
                SOAP_ERR_INVALID_ACTION,
                "Unknown Service Action",
            );
        }

        let mut ev = ActionEvent::new(&request.request);
        service.invoke(action.name, &mut ev);
        let (responses, error) = ev.into_parts();
        if let Some((code, message)) = &error {
            debug!("action {} failed: {} {}", request.action_name, code, message);
        }

        // sans argument de sortie ni erreur, la réponse vide par défaut
        // est synthétisée par l'adaptateur
        ActionOutcome { action: request.action_name.clone(), responses, error }
    }

    /// Lecture directe d'une variable d'état.
    pub fn on_state_var_request(&self, request: &StateVarRequest) -> Option<String> {
        if request.dev_udn != self.device.udn() {
            return None;
        }
        let service = self.device.find_service(&request.service_id)?;
        service.definition().find_variable(&request.var_name)?;
        debug!("state var request: {}", request.var_name);
        service.get_variable(&request.var_name)
    }
}
