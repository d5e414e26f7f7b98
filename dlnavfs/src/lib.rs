//! # dlnavfs - Système de fichiers virtuel du ContentDirectory
//!
//! Arbre hiérarchique d'objets (containers + ressources) à identifiants
//! numériques stables, enraciné à l'id 0. Le VFS porte :
//!
//! - l'insertion et la recherche d'objets, les liens parent/enfant et les
//!   compteurs `updateID` monotones ;
//! - la sérialisation DIDL-Lite (module [`didl`]) et le filtrage des
//!   champs émis ;
//! - les opérations Browse et Search du ContentDirectory ;
//! - la couche protocole/ressource (module [`protocol`]) : un
//!   [`VfsResource`] par protocole de transport enregistré, avec la
//!   génération des chaînes `protocolInfo` ;
//! - le transport HTTP intégré (module [`http_protocol`]) qui publie
//!   `/web/<id><ext>` sur le serveur d'origine.

pub mod didl;
mod errors;
pub mod filter;
pub mod http_protocol;
pub mod protocol;
mod search;
mod vfs;

use std::sync::Arc;

use parking_lot::Mutex;

pub use errors::VfsError;
pub use filter::Filter;
pub use http_protocol::{HttpProtocol, ServerLocation, VIRTUAL_DIR, export_didl};
pub use protocol::{
    Conversion, DlnaProtocol, Operation, PlaySpeed, ProtocolInfo, TransferInfo, VfsResource,
    dlna_org_other,
};
pub use vfs::{Container, DidlResult, Resource, Vfs, VfsMode, VfsObject, VfsObjectKind};

/// VFS partagé entre le ContentDirectory, le serveur d'origine et
/// l'application. Mutations et lectures sont sérialisées par le verrou ;
/// chaque lecteur observe un arbre cohérent à un instant donné.
pub type SharedVfs = Arc<Mutex<Vfs>>;

/// Enveloppe un [`Vfs`] pour le partage.
pub fn shared(vfs: Vfs) -> SharedVfs {
    Arc::new(Mutex::new(vfs))
}
