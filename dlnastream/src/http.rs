//! Client HTTP une-requête et backend séquentiel.
//!
//! Le client émet un GET unique et expose les en-têtes utiles
//! (`Content-Type`, `Content-Length`) ; les redirections `Location` sont
//! suivies récursivement. Les en-têtes sont traités sans sensibilité à la
//! casse par la couche HTTP.

use std::io::{Read, SeekFrom};

use tracing::debug;

use crate::errors::StreamError;
use crate::stream::{DlnaStream, StreamBackend};

/// En-têtes retenus d'une réponse GET.
#[derive(Debug, Clone)]
pub struct HttpInfo {
    /// `Content-Type` sans paramètres, vide si absent.
    pub mime: String,
    /// `Content-Length`, `-1` si absent (flux non borné).
    pub length: i64,
}

/// Lecteur d'un corps de réponse HTTP.
pub type HttpReader = Box<dyn Read + Send>;

/// Émet un GET unique sur `url` et retourne le corps en lecture
/// séquentielle avec les en-têtes retenus.
pub fn http_get(url: &str) -> Result<(HttpReader, HttpInfo), StreamError> {
    debug!("🌐 GET {}", url);
    let response = ureq::get(url).call().map_err(|e| StreamError::Http {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mime = response
        .headers()
        .get("Content-Type")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or("").trim().to_string())
        .unwrap_or_default();

    let length = response
        .headers()
        .get("Content-Length")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(-1);

    let reader: HttpReader = Box::new(response.into_body().into_reader());
    Ok((reader, HttpInfo { mime, length }))
}

/// Backend HTTP séquentiel : lectures dans l'ordre du flux, `seek` refusé.
pub struct SequentialHttp {
    reader: HttpReader,
    position: u64,
}

impl SequentialHttp {
    pub fn open(url: &str) -> Result<DlnaStream, StreamError> {
        let (reader, info) =
            http_get(url).map_err(|_| StreamError::NotFound(url.to_string()))?;
        Ok(DlnaStream::new(
            url.to_string(),
            info.mime,
            info.length,
            Box::new(SequentialHttp { reader, position: 0 }),
        ))
    }
}

impl StreamBackend for SequentialHttp {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let n = self.reader.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        // Tolérance : interroger la position courante n'est pas un
        // déplacement.
        if let SeekFrom::Current(0) = pos {
            return Ok(self.position);
        }
        Err(StreamError::NotSeekable)
    }

    fn cleanup(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}
