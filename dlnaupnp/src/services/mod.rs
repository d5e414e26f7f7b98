//! # Modèle de service UPnP
//!
//! Un service est décrit par deux tables : la table d'actions (nom +
//! arguments in/out, chacun relié à une variable d'état) et la table de
//! variables d'état (type déclaré, `sendEvents`, valeurs autorisées,
//! compteur d'eventing). La description SCPD est générée depuis ces
//! tables ; seules les actions implémentées y figurent.
//!
//! Les services concrets implémentent [`UpnpService`] : le dispatcher
//! résout le nom d'action dans la table puis appelle
//! [`invoke`](UpnpService::invoke) ; les valeurs de variables passent par
//! [`get_variable`](UpnpService::get_variable). Un service demande une
//! notification GENA en incrémentant le compteur d'eventing de la
//! variable concernée ([`StateVariable::request_event`]).

mod action_event;
mod scpd;

use std::sync::atomic::{AtomicU32, Ordering};

use dlnastream::web::WebHandlerChain;

pub use action_event::{ActionEvent, soap_request};

/// Types déclarés des variables d'état SCPD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    String,
    Boolean,
    I2,
    Ui2,
    I4,
    Ui4,
    Uri,
}

impl VarType {
    pub fn scpd_name(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Boolean => "boolean",
            VarType::I2 => "i2",
            VarType::Ui2 => "ui2",
            VarType::I4 => "i4",
            VarType::Ui4 => "ui4",
            VarType::Uri => "uri",
        }
    }
}

/// Variable d'état d'un service.
///
/// Le compteur `eventing` matérialise les demandes de notification : le
/// worker d'eventing compare chaque compteur au `last_change` du service
/// et notifie les variables en retard.
pub struct StateVariable {
    pub name: &'static str,
    pub var_type: VarType,
    pub evented: bool,
    pub allowed: &'static [&'static str],
    eventing: AtomicU32,
}

impl StateVariable {
    pub fn new(name: &'static str, var_type: VarType) -> Self {
        Self {
            name,
            var_type,
            evented: false,
            allowed: &[],
            eventing: AtomicU32::new(0),
        }
    }

    /// Marque la variable comme évènementielle (`sendEvents="yes"`).
    pub fn evented(mut self) -> Self {
        self.evented = true;
        self
    }

    /// Restreint la variable à une liste de valeurs autorisées.
    pub fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }

    /// Demande une notification : incrémente le compteur d'eventing
    /// (jamais remis à zéro, jamais nul après une première demande).
    pub fn request_event(&self) {
        if !self.evented {
            return;
        }
        let _ = self
            .eventing
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(if current == u32::MAX { 1 } else { current + 1 })
            });
    }

    pub fn eventing(&self) -> u32 {
        self.eventing.load(Ordering::SeqCst)
    }

    /// Aligne le compteur (le worker d'eventing rattrape les retards).
    pub fn set_eventing(&self, value: u32) {
        self.eventing.store(value, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for StateVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateVariable")
            .field("name", &self.name)
            .field("type", &self.var_type.scpd_name())
            .field("evented", &self.evented)
            .finish()
    }
}

/// Sens d'un argument d'action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

/// Argument d'action, relié à une variable d'état par son nom.
#[derive(Debug, Clone)]
pub struct ActionArgument {
    pub name: &'static str,
    pub direction: Direction,
    pub related: &'static str,
}

/// Action de la table d'un service.
///
/// Une action sans implémentation reste déclarée dans la table (elle
/// répond 401) mais n'apparaît pas dans le SCPD.
#[derive(Debug, Clone)]
pub struct ServiceAction {
    pub name: &'static str,
    pub arguments: Vec<ActionArgument>,
    pub implemented: bool,
}

impl ServiceAction {
    pub fn new(name: &'static str) -> Self {
        Self { name, arguments: Vec::new(), implemented: true }
    }

    /// Action déclarée sans callback (`501/401` à l'invocation).
    pub fn stub(name: &'static str) -> Self {
        Self { name, arguments: Vec::new(), implemented: false }
    }

    pub fn arg_in(mut self, name: &'static str, related: &'static str) -> Self {
        self.arguments.push(ActionArgument { name, direction: Direction::In, related });
        self
    }

    pub fn arg_out(mut self, name: &'static str, related: &'static str) -> Self {
        self.arguments.push(ActionArgument { name, direction: Direction::Out, related });
        self
    }
}

/// Description complète d'un service : identité, URLs et tables.
pub struct ServiceDefinition {
    /// Id du service (`urn:upnp-org:serviceId:ContentDirectory`).
    pub id: String,
    /// Type du service (`urn:schemas-upnp-org:service:ContentDirectory:1`).
    pub service_type: String,
    /// Chemins relatifs sous `/services/`.
    pub scpd_url: String,
    pub control_url: String,
    pub event_url: String,
    pub actions: Vec<ServiceAction>,
    pub variables: Vec<StateVariable>,
    last_change: AtomicU32,
}

impl ServiceDefinition {
    pub fn new(
        id: &str,
        service_type: &str,
        scpd_url: &str,
        control_url: &str,
        event_url: &str,
        actions: Vec<ServiceAction>,
        variables: Vec<StateVariable>,
    ) -> Self {
        Self {
            id: id.to_string(),
            service_type: service_type.to_string(),
            scpd_url: scpd_url.to_string(),
            control_url: control_url.to_string(),
            event_url: event_url.to_string(),
            actions,
            variables,
            last_change: AtomicU32::new(0),
        }
    }

    pub fn find_action(&self, name: &str) -> Option<&ServiceAction> {
        // parcours linéaire, les tables sont courtes
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn find_variable(&self, name: &str) -> Option<&StateVariable> {
        self.variables.iter().find(|variable| variable.name == name)
    }

    pub fn last_change(&self) -> u32 {
        self.last_change.load(Ordering::SeqCst)
    }

    pub fn set_last_change(&self, value: u32) {
        self.last_change.store(value, Ordering::SeqCst);
    }

    /// Document SCPD du service.
    pub fn scpd_xml(&self) -> String {
        scpd::scpd_xml(self)
    }
}

/// Un service UPnP concret, piloté par le dispatcher.
pub trait UpnpService: Send + Sync {
    fn definition(&self) -> &ServiceDefinition;

    /// Exécute une action de la table. Le callback remplit les arguments
    /// de sortie via [`ActionEvent::add_response`] ou pose un code
    /// d'erreur SOAP.
    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>);

    /// Valeur courante d'une variable d'état (fonction `get`). `None`
    /// pour les variables sans getter.
    fn get_variable(&self, name: &str) -> Option<String>;

    /// Enregistrement des répertoires virtuels du service au démarrage.
    fn init(&self, _web: &WebHandlerChain) {}

    /// Libération des ressources du service à l'arrêt.
    fn shutdown(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_event_counter() {
        let variable = StateVariable::new("SystemUpdateID", VarType::Ui4).evented();
        assert_eq!(variable.eventing(), 0);
        variable.request_event();
        assert_eq!(variable.eventing(), 1);
        variable.request_event();
        assert_eq!(variable.eventing(), 2);
    }

    #[test]
    fn test_request_event_ignored_when_not_evented() {
        let variable = StateVariable::new("A_ARG_TYPE_Count", VarType::Ui4);
        variable.request_event();
        assert_eq!(variable.eventing(), 0);
    }

    #[test]
    fn test_find_action_and_variable() {
        let definition = ServiceDefinition::new(
            "urn:upnp-org:serviceId:Dummy",
            "urn:schemas-upnp-org:service:Dummy:1",
            "dummy.xml",
            "dummy_control",
            "dummy_event",
            vec![ServiceAction::new("Browse"), ServiceAction::stub("CreateObject")],
            vec![StateVariable::new("SystemUpdateID", VarType::Ui4).evented()],
        );
        assert!(definition.find_action("Browse").unwrap().implemented);
        assert!(!definition.find_action("CreateObject").unwrap().implemented);
        assert!(definition.find_action("Nope").is_none());
        assert!(definition.find_variable("SystemUpdateID").is_some());
    }
}
