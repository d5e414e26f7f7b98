//! Contrat commun des flux et sélection du backend.

use std::io::SeekFrom;

use tracing::debug;

use crate::dbuffer::DoubleBuffered;
use crate::errors::StreamError;
use crate::file::FileBackend;
use crate::http::SequentialHttp;

/// Backend d'un flux : implémente la mécanique d'accès aux octets.
///
/// `cleanup` remet le flux dans l'état suivant son ouverture sans le
/// fermer ; un flux nettoyé peut être relu depuis le début sans être
/// rouvert (ni re-téléchargé quand le backend le permet).
pub trait StreamBackend: Send {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError>;

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError>;

    fn cleanup(&mut self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }
}

/// Flux média ouvert.
///
/// Porte l'URL d'origine, le type MIME détecté (vide si inconnu, le
/// profiler d'extensions le renseigne pour les fichiers locaux) et la
/// longueur totale (`-1` pour un flux non borné).
pub struct DlnaStream {
    url: String,
    mime: String,
    length: i64,
    backend: Box<dyn StreamBackend>,
}

impl DlnaStream {
    pub fn new(url: String, mime: String, length: i64, backend: Box<dyn StreamBackend>) -> Self {
        Self { url, mime, length, backend }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Renseigne le type MIME après coup (sniffing par extension).
    pub fn set_mime(&mut self, mime: &str) {
        self.mime = mime.to_string();
    }

    /// Longueur totale du flux, `-1` si inconnue.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        self.backend.read(buf)
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        self.backend.seek(pos)
    }

    /// Remet le flux dans l'état suivant son ouverture, sans le fermer.
    pub fn cleanup(&mut self) -> Result<(), StreamError> {
        self.backend.cleanup()
    }

    /// Lit l'intégralité du flux restant.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>, StreamError> {
        let mut out = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = self.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            out.extend_from_slice(&chunk[..n]);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for DlnaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DlnaStream")
            .field("url", &self.url)
            .field("mime", &self.mime)
            .field("length", &self.length)
            .finish()
    }
}

/// Ouvre un flux en choisissant le backend selon le schéma de l'URL.
///
/// - `file:` ou chemin nu : accès direct au fichier
/// - `http:`/`https:` : double tampon de préchargement
pub fn stream_open(url: &str) -> Result<DlnaStream, StreamError> {
    debug!("📡 stream_open: {}", url);
    if let Some(path) = url.strip_prefix("file:") {
        FileBackend::open(url, path)
    } else if url.starts_with("http:") || url.starts_with("https:") {
        DoubleBuffered::open(url)
    } else {
        FileBackend::open(url, url)
    }
}

/// Ouvre un flux HTTP séquentiel : GET unique, lectures dans l'ordre,
/// `seek` refusé. Réservé aux cas où le préchargement est indésirable.
pub fn stream_open_sequential(url: &str) -> Result<DlnaStream, StreamError> {
    if url.starts_with("http:") || url.starts_with("https:") {
        SequentialHttp::open(url)
    } else {
        stream_open(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_bare_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello world").unwrap();

        let mut stream = stream_open(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(stream.length(), 11);
        assert_eq!(stream.mime(), "");

        let mut buf = [0u8; 5];
        assert_eq!(stream.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn test_open_file_url() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"abc").unwrap();

        let url = format!("file://{}", tmp.path().display());
        let stream = stream_open(&url).unwrap();
        assert_eq!(stream.length(), 3);
    }

    #[test]
    fn test_open_missing_file() {
        let err = stream_open("/does/not/exist.mp3").unwrap_err();
        assert!(matches!(err, StreamError::NotFound(_)));
    }

    #[test]
    fn test_seek_and_cleanup() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();

        let mut stream = stream_open(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(stream.seek(SeekFrom::Start(4)).unwrap(), 4);
        let mut buf = [0u8; 2];
        stream.read(&mut buf).unwrap();
        assert_eq!(&buf, b"45");

        stream.cleanup().unwrap();
        stream.read(&mut buf).unwrap();
        assert_eq!(&buf, b"01");
    }
}
