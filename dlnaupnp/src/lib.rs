//! # dlnaupnp - Socle UPnP : services, devices, dispatcher, eventing
//!
//! Ce crate porte la mécanique UPnP commune aux deux devices :
//!
//! - le modèle de service à tables (actions + variables d'état) et la
//!   génération SCPD ([`services`]) ;
//! - l'assemblage du device et son descripteur XML ([`devices`]) ;
//! - l'interface étroite vers la pile SSDP/SOAP/GENA externe
//!   ([`adapter`]) ;
//! - le dispatcher des requêtes entrantes et le worker d'eventing
//!   périodique ([`dispatcher`], [`eventing`]).
//!
//! ## Architecture
//!
//! ```text
//! pile UPnP (adaptateur)
//!       │ SubscriptionRequest / ActionRequest / StateVarRequest
//!       ▼
//! UpnpDispatcher ──► UpnpService::invoke / get_variable
//!                        │
//!                        └── compteurs d'eventing ──► EventingWorker
//!                                                        │ 200 ms
//!                                                        ▼
//!                                              adapter.notify_ext (GENA)
//! ```

pub mod adapter;
pub mod devices;
pub mod dispatcher;
mod errors;
pub mod eventing;
pub mod services;

pub use adapter::{
    ActionRequest, DeviceHandle, NullAdapter, PropertySet, StateVarRequest, SubscriptionRequest,
    UpnpAdapter, UpnpEvent,
};
pub use devices::{Device, SERVICES_VIRTUAL_DIR, register_services_dir};
pub use dispatcher::{ActionOutcome, UpnpDispatcher};
pub use errors::UpnpError;
pub use eventing::EventingWorker;
pub use services::{
    ActionArgument, ActionEvent, Direction, ServiceAction, ServiceDefinition, StateVariable,
    UpnpService, VarType, soap_request,
};
