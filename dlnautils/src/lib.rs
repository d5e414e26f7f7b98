//! # dlnautils - Utilitaires partagés
//!
//! Petites briques communes aux crates DLNA :
//! - [`ToXmlElement`] : conversion d'un objet vers un élément XML
//! - [`xml`] : aide à l'émission de documents XML
//! - [`ip_utils`] : résolution des interfaces réseau locales

mod ip_utils;
pub mod xml;

pub use ip_utils::{guess_local_ip, interface_address, interface_exists};
pub use xml::{ToXmlElement, element_to_string};
