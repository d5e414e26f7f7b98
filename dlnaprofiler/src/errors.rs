use dlnastream::StreamError;
use thiserror::Error;

/// Erreurs du pipeline de profilage.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// Aucun profiler n'a reconnu le flux.
    #[error("no media profile matched for {0}")]
    NoProfile(String),

    /// Le flux n'a pas pu être ouvert ou lu.
    #[error(transparent)]
    Stream(#[from] StreamError),
}
