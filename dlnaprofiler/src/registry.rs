//! Registre ordonné de profilers et pipeline de création d'items.

use std::any::Any;
use std::sync::Arc;

use dlnastream::{DlnaStream, stream_open};
use tracing::{debug, warn};

use crate::errors::ProfilerError;
use crate::item::MediaItem;
use crate::profile::MediaProfile;
use crate::upnpav::UpnpAvProfiler;

/// Donnée opaque qu'un profiler attache à l'item qu'il a reconnu.
pub type ProfilerCookie = Box<dyn Any + Send>;

/// Un profiler sait reconnaître certains flux et produire leur profil.
pub trait Profiler: Send + Sync {
    /// Types MIME que ce profiler peut identifier (liste finie, sans
    /// doublon).
    fn supported_mime_types(&self) -> Vec<&'static str>;

    /// Sonde le flux ; retourne le profil reconnu et éventuellement une
    /// donnée opaque à conserver sur l'item.
    fn guess_media_profile(
        &self,
        stream: &mut DlnaStream,
    ) -> Option<(Arc<dyn MediaProfile>, Option<ProfilerCookie>)>;

    /// Retrouve un profil par son id (`MP3`, `JPEG_LRG`, …).
    fn get_media_profile(&self, profile_id: &str) -> Option<Arc<dyn MediaProfile>>;
}

/// Chaîne ordonnée de profilers.
///
/// Les profilers enregistrés sont sondés dans l'ordre d'enregistrement ;
/// le profiler d'extensions intégré est toujours sondé en dernier, en
/// repli universel.
pub struct ProfilerRegistry {
    profilers: Vec<Arc<dyn Profiler>>,
    fallback: Arc<UpnpAvProfiler>,
    check_extensions: bool,
}

impl Default for ProfilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilerRegistry {
    pub fn new() -> Self {
        Self {
            profilers: Vec::new(),
            fallback: Arc::new(UpnpAvProfiler),
            check_extensions: true,
        }
    }

    /// Active ou non le filtrage des profilers par type MIME sniffé.
    pub fn set_check_extensions(&mut self, check: bool) {
        self.check_extensions = check;
    }

    /// Enregistre un profiler ; il sera sondé après ceux déjà présents et
    /// avant le repli par extensions.
    pub fn add_profiler(&mut self, profiler: Arc<dyn Profiler>) {
        self.profilers.push(profiler);
    }

    /// Types MIME servables, tous profilers confondus, dédupliqués.
    pub fn supported_mime_types(&self) -> Vec<&'static str> {
        let mut mimes: Vec<&'static str> = Vec::new();
        for profiler in &self.profilers {
            for mime in profiler.supported_mime_types() {
                if !mimes.contains(&mime) {
                    mimes.push(mime);
                }
            }
        }
        for mime in self.fallback.supported_mime_types() {
            if !mimes.contains(&mime) {
                mimes.push(mime);
            }
        }
        mimes
    }

    /// Retrouve un profil par id à travers toute la chaîne.
    pub fn get_media_profile(&self, profile_id: &str) -> Option<Arc<dyn MediaProfile>> {
        for profiler in &self.profilers {
            if let Some(profile) = profiler.get_media_profile(profile_id) {
                return Some(profile);
            }
        }
        self.fallback.get_media_profile(profile_id)
    }

    /// Crée un [`MediaItem`] depuis une URL, en suivant le protocole :
    ///
    /// 1. ouverture du flux ;
    /// 2. sondage des profilers dans l'ordre, en écartant ceux dont la
    ///    liste de MIME ne contient pas le MIME sniffé (quand il y en a
    ///    un), avec `cleanup` entre deux sondes ;
    /// 3. capture de la taille du flux, fermeture ;
    /// 4. extraction des propriétés et métadonnées du profil retenu.
    pub fn create_item(&self, url: &str) -> Result<MediaItem, ProfilerError> {
        let mut stream = stream_open(url)?;

        if stream.mime().is_empty() {
            if let Some(mime) = UpnpAvProfiler::mime_for_url(url) {
                stream.set_mime(mime);
            }
        }

        let mut found = None;
        let fallback: Arc<dyn Profiler> = self.fallback.clone();
        for profiler in self.profilers.iter().chain(std::iter::once(&fallback)) {
            if self.check_extensions && !stream.mime().is_empty() {
                let mimes = profiler.supported_mime_types();
                if !mimes.iter().any(|mime| *mime == stream.mime()) {
                    continue;
                }
            }
            let guessed = profiler.guess_media_profile(&mut stream);
            stream.cleanup()?;
            if let Some(hit) = guessed {
                found = Some(hit);
                break;
            }
        }

        let filesize = if stream.length() >= 0 { stream.length() } else { 0 };
        drop(stream);

        let (profile, cookie) = found.ok_or_else(|| {
            warn!("❌ no profile matched: {}", url);
            ProfilerError::NoProfile(url.to_string())
        })?;

        debug!(
            "🎞️ profiled {} as {} ({})",
            url,
            profile.id(),
            profile.mime()
        );

        let mut item = MediaItem::new(url.to_string(), filesize, profile.clone());
        item.cookie = cookie;
        item.properties = profile.get_properties(&item);
        item.metadata = profile.get_metadata(&item);
        Ok(item)
    }
}
