//! Profil média : la capacité qu'un profiler attache à un flux reconnu.

use dlnastream::StreamError;

use crate::item::{MediaItem, Metadata, Properties};

/// Classe média d'un objet du ContentDirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClass {
    Unknown,
    Image,
    Audio,
    Av,
    Collection,
    Radio,
    Tv,
    Folder,
    Album,
}

impl MediaClass {
    /// Classe UPnP (`upnp:class`) associée.
    pub fn upnp_class(&self) -> Option<&'static str> {
        match self {
            MediaClass::Image => Some("object.item.imageItem.photo"),
            MediaClass::Audio => Some("object.item.audioItem.musicTrack"),
            MediaClass::Av => Some("object.item.videoItem.movie"),
            MediaClass::Collection => Some("object.container.playlistContainer"),
            MediaClass::Radio => Some("object.item.audioItem.audioBroadcast"),
            MediaClass::Tv => Some("object.item.videoItem.videoBroadcast"),
            MediaClass::Folder => Some("object.container.storageFolder"),
            MediaClass::Album => Some("object.container.album.musicAlbum"),
            MediaClass::Unknown => None,
        }
    }
}

/// Résultat de la lecture d'une trame par le moteur de lecture.
///
/// Pilote la machine d'états du transport : `Running` poursuit la
/// lecture, `Finishing` clôt proprement la piste (passage en
/// `TRANSITIONING`), `Finished` signale qu'il n'y a plus rien à lire
/// (avance sur la piste suivante ou arrêt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Finishing,
    Finished,
}

/// Capacité d'un profil média.
///
/// Un profil est produit par le profiler qui l'a reconnu et vit aussi
/// longtemps que lui ; les [`MediaItem`](crate::MediaItem) le partagent.
/// Les méthodes de lecture (`prepare_stream`, `read_frame`, …) ne sont
/// sollicitées que si [`playable`](Self::playable) est vrai.
pub trait MediaProfile: Send + Sync {
    /// Id du profil, partie de `DLNA.ORG_PN=` (vide si non profilé).
    fn id(&self) -> &str;

    /// Type MIME du profil.
    fn mime(&self) -> &str;

    /// Étiquette informelle (`2-ch`, `SD`, …).
    fn label(&self) -> &str {
        ""
    }

    fn media_class(&self) -> MediaClass;

    /// Extension de fichier associée, sans le point (`mp3`), vide sinon.
    fn extension(&self) -> &str {
        ""
    }

    /// Classe UPnP de l'objet CDS correspondant.
    fn upnp_class(&self) -> Option<&'static str> {
        self.media_class().upnp_class()
    }

    /// Le moteur de lecture peut-il décoder ce profil ?
    fn playable(&self) -> bool {
        false
    }

    fn get_properties(&self, _item: &MediaItem) -> Option<Properties> {
        None
    }

    fn get_metadata(&self, _item: &MediaItem) -> Option<Metadata> {
        None
    }

    /// Prépare le décodage ; le flux de l'item est déjà ouvert.
    fn prepare_stream(&self, _item: &mut MediaItem) -> Result<(), StreamError> {
        Ok(())
    }

    /// Décode la trame suivante.
    fn read_frame(&self, _item: &mut MediaItem) -> FrameStatus {
        FrameStatus::Finished
    }

    /// Déplace le point de lecture dans la piste.
    fn seek_stream(&self, _item: &mut MediaItem, _position: u64) -> Result<(), StreamError> {
        Err(StreamError::NotSeekable)
    }

    /// Libère les ressources de décodage ; le flux est fermé ensuite.
    fn close_stream(&self, _item: &mut MediaItem) {}
}
