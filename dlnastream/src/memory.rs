//! Backend mémoire : sert un document généré (SCPD, export DIDL) à
//! travers le contrat de flux commun.

use std::io::SeekFrom;

use crate::errors::StreamError;
use crate::stream::{DlnaStream, StreamBackend};

struct MemoryBackend {
    content: Vec<u8>,
    position: usize,
}

impl StreamBackend for MemoryBackend {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let avail = self.content.len().saturating_sub(self.position);
        let n = avail.min(buf.len());
        buf[..n].copy_from_slice(&self.content[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        let len = self.content.len() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::Current(delta) => self.position as i64 + delta,
            SeekFrom::End(delta) => len + delta,
        };
        if target < 0 {
            return Err(StreamError::InvalidSeek);
        }
        self.position = (target.min(len)) as usize;
        Ok(self.position as u64)
    }
}

/// Ouvre un flux sur un contenu en mémoire.
pub fn memory_open(url: &str, content: Vec<u8>, mime: &str) -> DlnaStream {
    let length = content.len() as i64;
    DlnaStream::new(
        url.to_string(),
        mime.to_string(),
        length,
        Box::new(MemoryBackend { content, position: 0 }),
    )
}
