//! # dlnastream - Lecteur de flux média
//!
//! Source d'octets unifiée à accès aléatoire au-dessus d'URLs `file:` et
//! `http:`. Chaque flux connaît son type MIME et sa longueur totale
//! (`-1` pour un flux non borné) et délègue `read`/`seek`/`cleanup` à un
//! backend choisi selon le schéma de l'URL :
//!
//! - `file:` ou chemin nu — lecture/positionnement directs sur le fichier
//! - `http:` par défaut — double tampon de préchargement (2 × 8192 octets)
//! - `http:` séquentiel — GET unique, `seek` refusé
//! - mémoire — documents générés (SCPD, exports DIDL)
//!
//! Le module [`web`] porte la chaîne de handlers HTTP du serveur d'origine :
//! chaque répertoire virtuel (`/services`, `/web`, `/didl`) enregistre un
//! handler qui sait produire un [`DlnaStream`] pour une URL entrante.

mod dbuffer;
mod errors;
mod file;
mod http;
mod memory;
mod stream;
pub mod web;

pub use dbuffer::DoubleBuffered;
pub use errors::StreamError;
pub use http::{HttpInfo, http_get};
pub use memory::memory_open;
pub use stream::{DlnaStream, StreamBackend, stream_open, stream_open_sequential};
