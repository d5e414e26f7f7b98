//! Couche protocole/ressource.
//!
//! Chaque protocole de transport enregistré auprès du VFS fabrique un
//! [`VfsResource`] par item inséré : URL de transport, chaîne
//! `protocolInfo`, taille et propriétés. La chaîne `protocolInfo` suit le
//! format CSV à 4 champs `<protocol>:<network>:<mime>:<other>` où
//! `other` vaut `*` en l'absence d'attributs DLNA.

use std::sync::Arc;

use dlnaprofiler::{MediaItem, MediaProfile, Properties};
use dlnastream::web::WebHandlerChain;

use crate::SharedVfs;

/// DLNA.ORG_PS : vitesse de lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaySpeed {
    Invalid = 0,
    Normal = 1,
}

/// DLNA.ORG_CI : indicateur de conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    None = 0,
    Transcoded = 1,
}

/// DLNA.ORG_OP : opérations supportées (deux chiffres décimaux).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    None = 0,
    Range = 1,
    TimeSeek = 10,
}

/// Attributs de transfert d'une ressource.
#[derive(Debug, Clone, Copy)]
pub struct TransferInfo {
    pub speed: PlaySpeed,
    pub conversion: Conversion,
    pub operation: Operation,
}

impl Default for TransferInfo {
    fn default() -> Self {
        Self {
            speed: PlaySpeed::Normal,
            conversion: Conversion::None,
            operation: Operation::Range,
        }
    }
}

/// Drapeaux DLNA.ORG_FLAGS publiés pour toute ressource servie en HTTP :
/// mode streaming, mode background, tolérance au calage de connexion,
/// DLNA v1.5. Huit chiffres hexadécimaux suivis de 24 zéros.
const DLNA_ORG_FLAGS: u32 = (1 << 24) | (1 << 22) | (1 << 21) | (1 << 20);

/// Synthétise le champ `other` DLNA d'un profil :
/// `DLNA.ORG_PN=<id>;DLNA.ORG_FLAGS=<hex32+24×"0">`.
pub fn dlna_org_other(profile_id: &str) -> String {
    format!(
        "DLNA.ORG_PN={};DLNA.ORG_FLAGS={:08x}{:024x}",
        profile_id, DLNA_ORG_FLAGS, 0
    )
}

/// Quadruplet `protocolInfo` d'une ressource.
#[derive(Clone)]
pub struct ProtocolInfo {
    /// Nom du protocole (`http-get`).
    pub protocol: String,
    /// Réseau, `*` en général.
    pub network: String,
    /// Profil du média (porte le MIME exact).
    pub profile: Arc<dyn MediaProfile>,
    /// Quatrième champ, `*` quand absent.
    pub other: Option<String>,
}

impl ProtocolInfo {
    /// Forme CSV 4 champs, telle qu'exposée par le ConnectionManager.
    pub fn to_protocol_string(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.protocol,
            self.network,
            self.profile.mime(),
            self.other.as_deref().unwrap_or("*")
        )
    }

    /// Forme par réponse DIDL : les paramètres `PS`/`CI`/`OP` précèdent
    /// les attributs du profil dans le quatrième champ.
    pub fn to_didl_string(&self, info: &TransferInfo) -> String {
        match &self.other {
            Some(other) => format!(
                "{}:{}:{}:DLNA.ORG_PS={};DLNA.ORG_CI={};DLNA.ORG_OP={:02};{}",
                self.protocol,
                self.network,
                self.profile.mime(),
                info.speed as u32,
                info.conversion as u32,
                info.operation as u32,
                other
            ),
            None => self.to_protocol_string(),
        }
    }
}

impl std::fmt::Debug for ProtocolInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_protocol_string())
    }
}

/// Ressource de transport d'un item : URL + protocolInfo + propriétés.
///
/// L'URL est synthétisée à la demande : l'adresse du serveur n'est connue
/// qu'une fois l'adaptateur lié à son port.
pub struct VfsResource {
    url_fn: Box<dyn Fn() -> String + Send + Sync>,
    pub protocol_info: ProtocolInfo,
    pub size: i64,
    pub properties: Option<Properties>,
    pub info: TransferInfo,
}

impl VfsResource {
    pub fn new(
        url_fn: Box<dyn Fn() -> String + Send + Sync>,
        protocol_info: ProtocolInfo,
        size: i64,
        properties: Option<Properties>,
    ) -> Self {
        Self {
            url_fn,
            protocol_info,
            size,
            properties,
            info: TransferInfo::default(),
        }
    }

    /// URL de transport de la ressource.
    pub fn url(&self) -> String {
        (self.url_fn)()
    }

    /// `protocolInfo` complet pour un élément `<res>`.
    pub fn didl_protocol_info(&self) -> String {
        self.protocol_info.to_didl_string(&self.info)
    }
}

/// Protocole de transport branché sur le VFS.
pub trait DlnaProtocol: Send + Sync {
    /// Nom du protocole, premier champ du `protocolInfo`.
    fn name(&self) -> &str;

    /// Champ réseau, `*` sauf exception.
    fn net(&self) -> &str {
        "*"
    }

    /// Fabrique la ressource de transport d'un item inséré dans le VFS.
    fn create_resource(&self, id: u32, item: &MediaItem) -> VfsResource;

    /// Enregistre les répertoires virtuels HTTP dont le protocole a
    /// besoin sur le serveur d'origine.
    fn init(&self, vfs: SharedVfs, web: &WebHandlerChain);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnaprofiler::MediaClass;

    struct Mp3Profile;

    impl MediaProfile for Mp3Profile {
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
    fn test_protocol_string_without_other() {
        let pinfo = ProtocolInfo {
            protocol: "http-get".to_string(),
            network: "*".to_string(),
            profile: Arc::new(Mp3Profile),
            other: None,
        };
        assert_eq!(pinfo.to_protocol_string(), "http-get:*:audio/mpeg:*");
    }

    #[test]
    fn test_dlna_other_flags() {
        let other = dlna_org_other("MP3");
        assert_eq!(
            other,
            format!("DLNA.ORG_PN=MP3;DLNA.ORG_FLAGS=01700000{}", "0".repeat(24))
        );
    }

    #[test]
    fn test_didl_string_orders_parameters() {
        let pinfo = ProtocolInfo {
            protocol: "http-get".to_string(),
            network: "*".to_string(),
            profile: Arc::new(Mp3Profile),
            other: Some(dlna_org_other("MP3")),
        };
        let didl = pinfo.to_didl_string(&TransferInfo::default());
        assert!(didl.starts_with("http-get:*:audio/mpeg:DLNA.ORG_PS=1;DLNA.ORG_CI=0;DLNA.ORG_OP=01;DLNA.ORG_PN=MP3;"));
    }

    #[test]
    fn test_protocol_info_round_trip() {
        // Les 4 champs séparés par ':' doivent reparser vers la ressource
        let pinfo = ProtocolInfo {
            protocol: "http-get".to_string(),
            network: "*".to_string(),
            profile: Arc::new(Mp3Profile),
            other: Some(dlna_org_other("MP3")),
        };
        let text = pinfo.to_protocol_string();
        let fields: Vec<&str> = text.splitn(4, ':').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], "http-get");
        assert_eq!(fields[1], "*");
        assert_eq!(fields[2], pinfo.profile.mime());
        assert_eq!(fields[3], pinfo.other.as_deref().unwrap());
    }
}
