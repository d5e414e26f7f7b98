//! Item média : un fichier ou une URL reconnus par un profiler.

use std::any::Any;
use std::sync::Arc;

use dlnastream::DlnaStream;

use crate::profile::MediaProfile;

/// Propriétés techniques d'un item média (attributs `res@…` du DIDL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// Durée au format `HH:MM:SS.`.
    pub duration: String,
    pub bitrate: u32,
    pub sample_frequency: u32,
    pub bits_per_sample: u32,
    /// Échantillons par trame, utilisé pour la position de lecture.
    pub samples_per_frame: u32,
    pub channels: u32,
    /// Résolution au format `WxH`, vide pour l'audio.
    pub resolution: String,
}

/// Métadonnées descriptives d'un item média, toutes optionnelles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub comment: Option<String>,
    pub album: Option<String>,
    pub track: Option<u32>,
    pub genre: Option<String>,
}

/// Item média : URL/fichier + profil reconnu + extraits du profiler.
///
/// L'item possède ses propriétés et métadonnées ; il partage le profil
/// avec le profiler qui l'a produit. Le flux de décodage n'est ouvert que
/// pendant la lecture (moteur AVTransport).
pub struct MediaItem {
    filename: String,
    filesize: i64,
    profile: Arc<dyn MediaProfile>,
    pub properties: Option<Properties>,
    pub metadata: Option<Metadata>,
    /// Flux de décodage, ouvert par le moteur de lecture.
    pub stream: Option<DlnaStream>,
    /// Donnée opaque déposée par le profiler lors de la reconnaissance.
    pub cookie: Option<Box<dyn Any + Send>>,
}

impl MediaItem {
    pub fn new(filename: String, filesize: i64, profile: Arc<dyn MediaProfile>) -> Self {
        Self {
            filename,
            filesize,
            profile,
            properties: None,
            metadata: None,
            stream: None,
            cookie: None,
        }
    }

    /// URL ou chemin du média.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Dernier composant du chemin, sans les répertoires.
    pub fn basename(&self) -> &str {
        self.filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.filename)
    }

    pub fn filesize(&self) -> i64 {
        self.filesize
    }

    pub fn profile(&self) -> &Arc<dyn MediaProfile> {
        &self.profile
    }

    pub fn profile_id(&self) -> &str {
        self.profile.id()
    }

    pub fn mime(&self) -> &str {
        self.profile.mime()
    }

    /// Titre affichable : métadonnée `title`, sinon nom de fichier.
    pub fn display_title(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.title.as_deref())
            .unwrap_or_else(|| self.basename())
    }
}

impl std::fmt::Debug for MediaItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaItem")
            .field("filename", &self.filename)
            .field("filesize", &self.filesize)
            .field("profile", &self.profile.id())
            .field("mime", &self.profile.mime())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MediaClass;

    struct FakeProfile;

    impl MediaProfile for FakeProfile {
        fn id(&self) -> &str {
            "MP3"
        }
        fn mime(&self) -> &str {
            "audio/mpeg"
        }
        fn media_class(&self) -> MediaClass {
            MediaClass::Audio
        }
    }

    #[test]
    fn test_basename() {
        let item = MediaItem::new("/music/a/b.mp3".to_string(), 42, Arc::new(FakeProfile));
        assert_eq!(item.basename(), "b.mp3");
        assert_eq!(item.display_title(), "b.mp3");
    }

    #[test]
    fn test_display_title_prefers_metadata() {
        let mut item = MediaItem::new("/music/b.mp3".to_string(), 0, Arc::new(FakeProfile));
        item.metadata = Some(Metadata {
            title: Some("Come Together".to_string()),
            ..Metadata::default()
        });
        assert_eq!(item.display_title(), "Come Together");
    }
}
