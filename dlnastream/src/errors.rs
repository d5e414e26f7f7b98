use thiserror::Error;

/// Erreurs du lecteur de flux.
#[derive(Debug, Error)]
pub enum StreamError {
    /// L'URL ne correspond à aucune ressource ouvrable.
    #[error("stream not found: {0}")]
    NotFound(String),

    /// Le backend ne supporte pas le déplacement demandé.
    #[error("stream is not seekable")]
    NotSeekable,

    /// Offset de positionnement invalide (négatif en SEEK_SET).
    #[error("invalid seek offset")]
    InvalidSeek,

    /// Erreur d'entrée/sortie sous-jacente.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Échec de la requête HTTP.
    #[error("http error on {url}: {reason}")]
    Http { url: String, reason: String },
}
