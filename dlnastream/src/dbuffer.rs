//! Backend HTTP à double tampon de préchargement.
//!
//! Deux tampons fixes de 8192 octets. Les lectures servent le tampon
//! actif ; dès que le curseur franchit 90 % du tampon, l'autre tampon est
//! rempli par une lecture réseau bloquante. `seek(SET, n)` rouvre l'URL et
//! écarte les octets jusqu'à `n` par blocs de la taille d'un tampon ;
//! `seek(CUR, Δ)` glisse dans la fenêtre des deux tampons quand c'est
//! possible et se rabat sinon sur une réouverture ; `seek(END, …)` est
//! refusé.

use std::io::{Read, SeekFrom};

use tracing::{debug, trace};

use crate::errors::StreamError;
use crate::http::{HttpReader, http_get};
use crate::stream::{DlnaStream, StreamBackend};

const DBUFFER_SIZE: usize = 8192;
const DBUFFER_THRESHOLD: usize = DBUFFER_SIZE * 9 / 10;

/// Fabrique de lecteurs : rouvre la source depuis son début.
pub type ReopenFn = Box<dyn FnMut() -> Result<HttpReader, StreamError> + Send>;

struct Half {
    data: Box<[u8]>,
    len: usize,
}

impl Half {
    fn new() -> Self {
        Self { data: vec![0u8; DBUFFER_SIZE].into_boxed_slice(), len: 0 }
    }

    /// Tampon partiellement rempli : la source est épuisée derrière lui.
    fn is_short(&self) -> bool {
        self.len < DBUFFER_SIZE
    }
}

pub struct DoubleBuffered {
    reader: HttpReader,
    reopen: ReopenFn,
    halves: [Half; 2],
    current: usize,
    offset: usize,
    total_offset: u64,
    next_ready: bool,
}

impl DoubleBuffered {
    /// Ouvre une URL HTTP derrière le double tampon.
    pub fn open(url: &str) -> Result<DlnaStream, StreamError> {
        let (reader, info) =
            http_get(url).map_err(|_| StreamError::NotFound(url.to_string()))?;
        let reopen_url = url.to_string();
        let reopen: ReopenFn =
            Box::new(move || http_get(&reopen_url).map(|(reader, _)| reader));
        let backend = DoubleBuffered::with_reader(reader, reopen)?;
        Ok(DlnaStream::new(
            url.to_string(),
            info.mime,
            info.length,
            Box::new(backend),
        ))
    }

    /// Construit le backend sur un lecteur déjà ouvert. `reopen` doit
    /// produire un nouveau lecteur positionné au début de la source.
    pub fn with_reader(reader: HttpReader, reopen: ReopenFn) -> Result<Self, StreamError> {
        let mut dbuffer = Self {
            reader,
            reopen,
            halves: [Half::new(), Half::new()],
            current: 0,
            offset: 0,
            total_offset: 0,
            next_ready: false,
        };
        dbuffer.fill_current()?;
        Ok(dbuffer)
    }

    fn fill(reader: &mut HttpReader, half: &mut Half) -> Result<(), StreamError> {
        half.len = 0;
        while half.len < DBUFFER_SIZE {
            let n = reader.read(&mut half.data[half.len..])?;
            if n == 0 {
                break;
            }
            half.len += n;
        }
        Ok(())
    }

    fn fill_current(&mut self) -> Result<(), StreamError> {
        Self::fill(&mut self.reader, &mut self.halves[self.current])?;
        self.offset = 0;
        Ok(())
    }

    fn fill_next(&mut self) -> Result<(), StreamError> {
        let next = 1 - self.current;
        Self::fill(&mut self.reader, &mut self.halves[next])?;
        self.next_ready = true;
        Ok(())
    }

    /// Bascule sur l'autre tampon, en le remplissant s'il ne l'est pas.
    fn next_buffer(&mut self) -> Result<(), StreamError> {
        if !self.next_ready {
            self.fill_next()?;
        }
        self.current = 1 - self.current;
        self.next_ready = false;
        self.offset = 0;
        Ok(())
    }

    /// Rouvre la source et repart du début du flux.
    fn reset(&mut self) -> Result<(), StreamError> {
        debug!("🔁 double buffer reset");
        self.reader = (self.reopen)()?;
        self.current = 0;
        self.next_ready = false;
        self.total_offset = 0;
        self.fill_current()
    }

    /// Écarte `count` octets depuis la position réseau courante.
    fn discard(&mut self, mut count: u64) -> Result<(), StreamError> {
        let mut scratch = [0u8; DBUFFER_SIZE];
        while count > 0 {
            let want = count.min(DBUFFER_SIZE as u64) as usize;
            let n = self.reader.read(&mut scratch[..want])?;
            if n == 0 {
                break;
            }
            count -= n as u64;
        }
        Ok(())
    }

    /// Avance de `count` octets en consommant la fenêtre.
    fn skip_forward(&mut self, mut count: u64) -> Result<(), StreamError> {
        while count > 0 {
            let half = &self.halves[self.current];
            let avail = half.len - self.offset;
            if avail == 0 {
                if half.is_short() {
                    break;
                }
                self.next_buffer()?;
                continue;
            }
            let step = count.min(avail as u64) as usize;
            self.offset += step;
            self.total_offset += step as u64;
            count -= step as u64;
        }
        Ok(())
    }

    fn refill_if_needed(&mut self) -> Result<(), StreamError> {
        if self.offset >= DBUFFER_THRESHOLD
            && !self.next_ready
            && !self.halves[self.current].is_short()
        {
            trace!("double buffer threshold crossed, prefetching");
            self.fill_next()?;
        }
        Ok(())
    }
}

impl StreamBackend for DoubleBuffered {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let mut written = 0;
        while written < buf.len() {
            let half = &self.halves[self.current];
            let avail = half.len - self.offset;
            if avail == 0 {
                if half.is_short() {
                    break;
                }
                self.next_buffer()?;
                continue;
            }
            let n = avail.min(buf.len() - written);
            buf[written..written + n]
                .copy_from_slice(&half.data[self.offset..self.offset + n]);
            self.offset += n;
            self.total_offset += n as u64;
            written += n;
        }
        self.refill_if_needed()?;
        Ok(written)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        match pos {
            SeekFrom::End(_) => Err(StreamError::NotSeekable),
            SeekFrom::Start(target) => {
                debug!("🔁 double buffer reopen for absolute seek to {}", target);
                self.reader = (self.reopen)()?;
                self.next_ready = false;
                self.discard(target)?;
                self.fill_current()?;
                self.total_offset = target;
                Ok(self.total_offset)
            }
            SeekFrom::Current(0) => Ok(self.total_offset),
            SeekFrom::Current(delta) => {
                let target = self.total_offset as i64 + delta;
                if target < 0 {
                    return Err(StreamError::InvalidSeek);
                }
                if delta > 0 {
                    // Consommation de la fenêtre vers l'avant
                    self.skip_forward(delta as u64)?;
                    self.refill_if_needed()?;
                } else if self.offset as i64 + delta >= 0 {
                    // Glissement arrière dans le tampon courant
                    self.offset = (self.offset as i64 + delta) as usize;
                    self.total_offset = target as u64;
                } else {
                    // Plus d'historique : réouverture à la position absolue
                    return self.seek(SeekFrom::Start(target as u64));
                }
                Ok(self.total_offset)
            }
        }
    }

    fn cleanup(&mut self) -> Result<(), StreamError> {
        self.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn make_dbuffer(data: Vec<u8>) -> DoubleBuffered {
        let reopen_data = data.clone();
        let reader: HttpReader = Box::new(Cursor::new(data));
        let reopen: ReopenFn = Box::new(move || {
            let reader: HttpReader = Box::new(Cursor::new(reopen_data.clone()));
            Ok(reader)
        });
        DoubleBuffered::with_reader(reader, reopen).unwrap()
    }

    #[test]
    fn test_sequential_reads_match_source() {
        let data = pattern(50_000);
        let mut dbuffer = make_dbuffer(data.clone());

        let mut out = Vec::new();
        let mut buf = [0u8; 1000];
        loop {
            let n = dbuffer.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, data);
    }

    #[test]
    fn test_reads_crossing_buffer_boundary() {
        let data = pattern(30_000);
        let mut dbuffer = make_dbuffer(data.clone());

        // Lecture plus large qu'un tampon
        let mut buf = vec![0u8; 10_000];
        let n = dbuffer.read(&mut buf).unwrap();
        assert_eq!(n, 10_000);
        assert_eq!(&buf[..], &data[..10_000]);

        let n = dbuffer.read(&mut buf).unwrap();
        assert_eq!(n, 10_000);
        assert_eq!(&buf[..], &data[10_000..20_000]);
    }

    #[test]
    fn test_seek_set_reopens() {
        let data = pattern(40_000);
        let mut dbuffer = make_dbuffer(data.clone());

        let mut buf = [0u8; 100];
        dbuffer.read(&mut buf).unwrap();

        let position = dbuffer.seek(SeekFrom::Start(20_000)).unwrap();
        assert_eq!(position, 20_000);

        dbuffer.read(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[20_000..20_100]);
    }

    #[test]
    fn test_seek_cur_forward_and_back() {
        let data = pattern(40_000);
        let mut dbuffer = make_dbuffer(data.clone());

        let mut buf = [0u8; 100];
        dbuffer.read(&mut buf).unwrap();
        assert_eq!(dbuffer.seek(SeekFrom::Current(0)).unwrap(), 100);

        // Avant, au-delà du tampon courant
        let position = dbuffer.seek(SeekFrom::Current(12_000)).unwrap();
        assert_eq!(position, 12_100);
        dbuffer.read(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[12_100..12_200]);

        // Arrière, dans le tampon courant
        let position = dbuffer.seek(SeekFrom::Current(-50)).unwrap();
        assert_eq!(position, 12_150);
        dbuffer.read(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[12_150..12_250]);
    }

    #[test]
    fn test_seek_end_unsupported() {
        let mut dbuffer = make_dbuffer(pattern(1000));
        assert!(matches!(
            dbuffer.seek(SeekFrom::End(0)),
            Err(StreamError::NotSeekable)
        ));
    }

    #[test]
    fn test_cleanup_restarts_from_zero() {
        let data = pattern(20_000);
        let mut dbuffer = make_dbuffer(data.clone());

        let mut buf = [0u8; 500];
        dbuffer.read(&mut buf).unwrap();
        dbuffer.cleanup().unwrap();

        dbuffer.read(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[..500]);
    }

    #[test]
    fn test_short_source() {
        // Source plus petite qu'un seul tampon
        let data = pattern(100);
        let mut dbuffer = make_dbuffer(data.clone());

        let mut buf = [0u8; 300];
        let n = dbuffer.read(&mut buf).unwrap();
        assert_eq!(n, 100);
        assert_eq!(&buf[..100], &data[..]);
        assert_eq!(dbuffer.read(&mut buf).unwrap(), 0);
    }
}
