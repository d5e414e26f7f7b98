//! # dlnaprofiler - Identification des profils média DLNA
//!
//! Chaîne ordonnée de profilers : confronté à un flux, chaque profiler
//! peut reconnaître un profil DLNA (id, type MIME, classe média) et
//! extraire propriétés et métadonnées. Le profiler d'extensions intégré
//! sert de repli universel : une table associe l'extension du nom de
//! fichier à un triplet {MIME, classe, id de profil}.
//!
//! ## Pipeline de création d'un item
//!
//! ```text
//! URL ──► stream_open ──► sniff MIME ──► profilers (dans l'ordre)
//!                                             │
//!                                   premier profil reconnu
//!                                             │
//!                       get_properties / get_metadata ──► MediaItem
//! ```

mod errors;
mod item;
mod profile;
mod registry;
mod upnpav;

pub use errors::ProfilerError;
pub use item::{MediaItem, Metadata, Properties};
pub use profile::{FrameStatus, MediaClass, MediaProfile};
pub use registry::{Profiler, ProfilerCookie, ProfilerRegistry};
pub use upnpav::UpnpAvProfiler;
