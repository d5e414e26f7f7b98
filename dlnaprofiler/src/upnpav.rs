//! Profiler d'extensions intégré.
//!
//! Pure table de correspondance : l'extension du dernier composant du nom
//! de fichier (comparée sans casse) donne un triplet {MIME, classe média,
//! id de profil}. Aucune inspection du contenu. Sert de repli universel
//! derrière les profilers spécialisés.

use std::sync::Arc;

use dlnastream::DlnaStream;
use once_cell::sync::Lazy;

use crate::profile::{MediaClass, MediaProfile};
use crate::registry::{Profiler, ProfilerCookie};

/// Profil figé issu de la table d'extensions.
#[derive(Debug, Clone, Copy)]
pub struct StaticProfile {
    extension: &'static str,
    id: &'static str,
    mime: &'static str,
    class: MediaClass,
}

impl MediaProfile for StaticProfile {
    fn id(&self) -> &str {
        self.id
    }

    fn mime(&self) -> &str {
        self.mime
    }

    fn media_class(&self) -> MediaClass {
        self.class
    }

    fn extension(&self) -> &str {
        self.extension
    }
}

macro_rules! entry {
    ($ext:literal, $id:literal, $mime:literal, $class:ident) => {
        StaticProfile {
            extension: $ext,
            id: $id,
            mime: $mime,
            class: MediaClass::$class,
        }
    };
}

static MIME_TYPE_LIST: &[StaticProfile] = &[
    // Fichiers vidéo
    entry!("asf", "WMVMED_BASE", "video/x-ms-asf", Av),
    entry!("avc", "AVC_MP4_MP_SD_AC3", "video/x-msvideo", Av),
    entry!("avi", "", "video/x-msvideo", Av),
    entry!("dv", "", "video/x-dv", Av),
    entry!("divx", "MPEG4_P2_MP4_SP_AAC", "video/x-msvideo", Av),
    entry!("wmv", "WMVMED_BASE", "video/x-ms-wmv", Av),
    entry!("mjpg", "", "video/x-motion-jpeg", Av),
    entry!("mjpeg", "", "video/x-motion-jpeg", Av),
    entry!("mpeg", "MPEG1", "video/mpeg", Av),
    entry!("mpg", "MPEG1", "video/mpeg", Av),
    entry!("mpe", "MPEG1", "video/mpeg", Av),
    entry!("mp2p", "MPEG_PS_PAL", "video/mp2p", Av),
    entry!("vob", "MPEG_PS_PAL", "video/mp2p", Av),
    entry!("mp2t", "MPEG_TS_SD_EU", "video/mp2t", Av),
    entry!("m1v", "MPEG1", "video/mpeg", Av),
    entry!("m2v", "MPEG_PS_PAL", "video/mpeg2", Av),
    entry!("mpg2", "MPEG_PS_PAL", "video/mpeg2", Av),
    entry!("mpeg2", "MPEG_PS_PAL", "video/mpeg2", Av),
    entry!("ps", "MPEG_PS_PAL", "video/mpeg2", Av),
    entry!("m4v", "AVC_MP4_MP_SD_AC3", "video/mp4", Av),
    entry!("m4p", "AVC_MP4_MP_SD_AC3", "video/mp4", Av),
    entry!("mp4", "MPEG4_P2_MP4_SP_AAC", "video/mp4", Av),
    entry!("mp4ps", "MPEG4_P2_MP4_SP_AAC", "video/x-nerodigital-ps", Av),
    entry!("ts", "MPEG_TS_SD_EU", "video/mpeg2", Av),
    entry!("ogm", "", "video/mpeg", Av),
    entry!("mkv", "", "video/mpeg", Av),
    entry!("rmvb", "", "video/mpeg", Av),
    entry!("mov", "AVC_MP4_MP_SD_AC3", "video/quicktime", Av),
    entry!("hdmov", "AVC_MP4_MP_SD_AC3", "video/quicktime", Av),
    entry!("qt", "AVC_MP4_MP_SD_AC3", "video/quicktime", Av),
    entry!("bin", "MPEG_PS_PAL", "video/mpeg2", Av),
    entry!("iso", "MPEG_PS_PAL", "video/mpeg2", Av),
    // Fichiers audio
    entry!("3gp", "", "audio/3gpp", Audio),
    entry!("aac", "AAC_ISO", "audio/x-aac", Audio),
    entry!("ac3", "AC3", "audio/x-ac3", Audio),
    entry!("aif", "", "audio/aiff", Audio),
    entry!("aiff", "", "audio/aiff", Audio),
    entry!("at3p", "", "audio/x-atrac3", Audio),
    entry!("au", "", "audio/basic", Audio),
    entry!("snd", "", "audio/basic", Audio),
    entry!("dts", "", "audio/x-dts", Audio),
    entry!("rmi", "", "audio/midi", Audio),
    entry!("mid", "", "audio/midi", Audio),
    entry!("mp1", "", "audio/mp1", Audio),
    entry!("mp2", "", "audio/mp2", Audio),
    entry!("mp3", "MP3", "audio/mpeg", Audio),
    entry!("m4a", "AAC_ADTS", "audio/mp4", Audio),
    entry!("ogg", "", "audio/x-ogg", Audio),
    entry!("wav", "", "audio/wav", Audio),
    entry!("pcm", "LPCM", "audio/L16", Audio),
    entry!("lpcm", "LPCM", "audio/L16", Audio),
    entry!("l16", "LPCM_low", "audio/L16", Audio),
    entry!("wma", "WMABASE", "audio/x-ms-wma", Audio),
    entry!("mka", "", "audio/mpeg", Audio),
    entry!("ra", "", "audio/x-pn-realaudio", Audio),
    entry!("rm", "", "audio/x-pn-realaudio", Audio),
    entry!("ram", "", "audio/x-pn-realaudio", Audio),
    entry!("flac", "", "audio/x-flac", Audio),
    entry!("acm", "ATRAC3plus", "audio/x-sony-oma", Audio),
    // Fichiers image
    entry!("bmp", "", "image/bmp", Image),
    entry!("ico", "", "image/x-icon", Image),
    entry!("gif", "", "image/gif", Image),
    entry!("jpeg", "JPEG_LRG", "image/jpeg", Image),
    entry!("jpg", "JPEG_MED", "image/jpeg", Image),
    entry!("jpe", "JPEG_SML", "image/jpeg", Image),
    entry!("pcd", "", "image/x-ms-bmp", Image),
    entry!("png", "PNG_LRG", "image/png", Image),
    entry!("pnm", "", "image/x-portable-anymap", Image),
    entry!("ppm", "", "image/x-portable-pixmap", Image),
    entry!("qti", "", "image/x-quicktime", Image),
    entry!("qtf", "", "image/x-quicktime", Image),
    entry!("qtif", "", "image/x-quicktime", Image),
    entry!("tif", "", "image/tiff", Image),
    entry!("tiff", "", "image/tiff", Image),
];

static SUPPORTED_MIMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut mimes = Vec::new();
    for profile in MIME_TYPE_LIST {
        if !mimes.contains(&profile.mime) {
            mimes.push(profile.mime);
        }
    }
    mimes
});

/// Extension (en minuscules) du dernier composant d'une URL.
fn file_extension(url: &str) -> Option<String> {
    let name = url.rsplit(['/', '\\']).next()?;
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Profiler par table d'extensions.
pub struct UpnpAvProfiler;

impl UpnpAvProfiler {
    /// Recherche dans la table l'entrée d'une URL.
    fn lookup(url: &str) -> Option<&'static StaticProfile> {
        let ext = file_extension(url)?;
        MIME_TYPE_LIST
            .iter()
            .find(|profile| profile.extension == ext)
    }

    /// Sniffe le MIME d'une URL, sans ouvrir le contenu.
    pub fn mime_for_url(url: &str) -> Option<&'static str> {
        Self::lookup(url).map(|profile| profile.mime)
    }
}

impl Profiler for UpnpAvProfiler {
    fn supported_mime_types(&self) -> Vec<&'static str> {
        SUPPORTED_MIMES.clone()
    }

    fn guess_media_profile(
        &self,
        stream: &mut DlnaStream,
    ) -> Option<(Arc<dyn MediaProfile>, Option<ProfilerCookie>)> {
        let profile = Self::lookup(stream.url())?;
        Some((Arc::new(*profile), None))
    }

    fn get_media_profile(&self, profile_id: &str) -> Option<Arc<dyn MediaProfile>> {
        if profile_id.is_empty() {
            return None;
        }
        MIME_TYPE_LIST
            .iter()
            .find(|profile| profile.id == profile_id)
            .map(|profile| Arc::new(*profile) as Arc<dyn MediaProfile>)
    }
}
