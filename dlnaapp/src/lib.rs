//! # dlnaapp - Outils en ligne de commande
//!
//! Trois binaires de référence au-dessus de la bibliothèque :
//!
//! - `dlna-dms` : partage un répertoire en Media Server ;
//! - `dlna-dmr` : expose un Media Renderer ;
//! - `dlna-profiler` : identifie le profil DLNA d'un fichier.

pub mod scan;

use dlnacontrol::Verbosity;

/// Installe le souscripteur `tracing` des binaires ; `RUST_LOG` prime
/// sur la verbosité configurée.
pub fn init_logging(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.env_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
