//! # dlnamediarenderer - Digital Media Renderer (DMR)
//!
//! Le service AVTransport et son moteur de lecture : machine d'états de
//! transport multi-instances, playlist dédupliquée par CRC-32 de l'URI,
//! un thread de lecture par instance pilotant le décodeur du profil,
//! eventing GENA `LastChange`. Le ConnectionManager du renderer annonce
//! en `Sink` les types MIME que les profilers savent décoder.

pub mod avtransport;
pub mod connectionmanager;
mod device;

pub use avtransport::{AvtsService, TransportState};
pub use connectionmanager::CmsService;
pub use device::new_dmr;
