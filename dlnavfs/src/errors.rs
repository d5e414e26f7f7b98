use thiserror::Error;

/// Erreurs du système de fichiers virtuel.
#[derive(Debug, Error)]
pub enum VfsError {
    /// Aucun objet ne porte cet id.
    #[error("unknown object id #{0}")]
    UnknownObject(u32),

    /// L'opération demande un container.
    #[error("object #{0} is not a container")]
    NotContainer(u32),

    /// L'opération demande une ressource.
    #[error("object #{0} is not a resource")]
    NotResource(u32),

    /// Échec de sérialisation DIDL-Lite.
    #[error("didl serialization failed: {0}")]
    Didl(String),
}
