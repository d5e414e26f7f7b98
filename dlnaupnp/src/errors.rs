use thiserror::Error;

/// Erreurs de la couche UPnP.
#[derive(Debug, Error)]
pub enum UpnpError {
    /// Échec de l'adaptateur réseau (bind, publication, notification).
    #[error("upnp network error: {0}")]
    Network(String),

    /// Le device ou le service visé n'existe pas.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// Document XML invalide.
    #[error("xml error: {0}")]
    Xml(String),
}
