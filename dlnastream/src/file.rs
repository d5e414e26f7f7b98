//! Backend fichier : lectures et positionnements directs.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use crate::errors::StreamError;
use crate::stream::{DlnaStream, StreamBackend};

pub struct FileBackend {
    file: File,
}

impl FileBackend {
    /// Ouvre un fichier local. Le type MIME est laissé vide, le profiler
    /// d'extensions le renseignera.
    pub fn open(url: &str, path: &str) -> Result<DlnaStream, StreamError> {
        let file = File::open(path).map_err(|_| StreamError::NotFound(url.to_string()))?;
        let length = file
            .metadata()
            .map(|meta| meta.len() as i64)
            .unwrap_or(-1);

        Ok(DlnaStream::new(
            url.to_string(),
            String::new(),
            length,
            Box::new(FileBackend { file }),
        ))
    }
}

impl StreamBackend for FileBackend {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        Ok(self.file.read(buf)?)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        Ok(self.file.seek(pos)?)
    }
}
