//! Playlist d'une instance AVTransport.
//!
//! Séquence ordonnée d'entrées indexée par l'empreinte CRC-32 de l'URI :
//! insérer une URI déjà présente est un no-op. Deux curseurs : `current`
//! (piste en cours) et `next` (cible de la prochaine transition),
//! recalculé comme successeur de `current` et re-ciblé par Next,
//! Previous et Seek(TRACK_NR).

use std::sync::Arc;

use dlnaprofiler::{MediaItem, ProfilerError, ProfilerRegistry};
use parking_lot::Mutex;

/// Entrée de playlist : id CRC-32 de l'URI + item média.
pub struct PlaylistEntry {
    pub id: u32,
    pub item: Arc<Mutex<MediaItem>>,
}

#[derive(Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    current: Option<usize>,
    next: Option<usize>,
}

/// Empreinte d'une URI de playlist.
pub fn uri_id(uri: &str) -> u32 {
    crc32fast::hash(uri.as_bytes())
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        let id = uri_id(uri);
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Insère une URI en la profilant. No-op si l'empreinte est déjà
    /// présente. La première entrée devient la piste courante.
    pub fn add(&mut self, registry: &ProfilerRegistry, uri: &str) -> Result<(), ProfilerError> {
        if self.contains_uri(uri) {
            return Ok(());
        }
        let item = registry.create_item(uri)?;
        self.push_item(uri, item);
        Ok(())
    }

    /// Insère un item déjà profilé (profilage fait hors verrou).
    pub fn push_item(&mut self, uri: &str, item: MediaItem) {
        if self.contains_uri(uri) {
            return;
        }
        if self.entries.is_empty() {
            self.current = Some(0);
        }
        self.entries.push(PlaylistEntry {
            id: uri_id(uri),
            item: Arc::new(Mutex::new(item)),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
        self.next = None;
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Position 1-based de la piste courante, 0 sans piste.
    pub fn current_track(&self) -> u32 {
        self.current.map(|index| index as u32 + 1).unwrap_or(0)
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn next_entry(&self) -> Option<&PlaylistEntry> {
        self.next.and_then(|index| self.entries.get(index))
    }

    pub fn next_index(&self) -> Option<usize> {
        self.next
    }

    /// Successeur naturel de la piste courante (ou la tête sans piste
    /// courante).
    pub fn successor(&self) -> Option<usize> {
        match self.current {
            Some(index) if index + 1 < self.entries.len() => Some(index + 1),
            Some(_) => None,
            None if !self.entries.is_empty() => Some(0),
            None => None,
        }
    }

    /// Recalcule `next` comme successeur de la piste courante.
    pub fn recompute_next(&mut self) {
        self.next = self.successor();
    }

    /// Cible `next` à ±N pistes de la courante ; hors bornes vaut `None`.
    pub fn seek_relative(&self, delta: i64) -> Option<usize> {
        let base = self.current? as i64;
        let target = base + delta;
        if target < 0 || target >= self.entries.len() as i64 {
            None
        } else {
            Some(target as usize)
        }
    }

    pub fn set_next(&mut self, index: Option<usize>) {
        self.next = index;
    }

    /// La transition s'achève : `next` devient courante.
    pub fn advance(&mut self) {
        self.current = self.next;
        self.recompute_next();
    }

    /// Repositionne la lecture en tête de playlist.
    pub fn rewind(&mut self) {
        self.current = if self.entries.is_empty() { None } else { Some(0) };
        self.recompute_next();
    }

    pub fn previous_exists(&self) -> bool {
        matches!(self.current, Some(index) if index > 0)
    }
}
