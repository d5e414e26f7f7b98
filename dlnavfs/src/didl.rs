//! # Sérialisation DIDL-Lite
//!
//! Modèle de document DIDL-Lite sérialisé avec quick-xml. L'enveloppe
//! déclare les trois espaces de noms du schéma UPnP :
//!
//! ```text
//! <DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"
//!            xmlns:dc="http://purl.org/dc/elements/1.1/"
//!            xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/">
//! ```
//!
//! La sérialisation échappe toutes les données de caractères : un titre
//! contenant `<`, `&` ou `>` reste du XML valide.

use serde::Serialize;

use dlnaprofiler::MediaItem;

use crate::errors::VfsError;
use crate::filter::Filter;
use crate::protocol::VfsResource;

pub const DIDL_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const UPNP_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";

/// Racine d'un document DIDL-Lite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "DIDL-Lite")]
pub struct DidlLite {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:dc")]
    pub xmlns_dc: String,

    #[serde(rename = "@xmlns:upnp")]
    pub xmlns_upnp: String,

    #[serde(rename = "container", skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<DidlContainer>,

    #[serde(rename = "item", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<DidlItem>,
}

impl Default for DidlLite {
    fn default() -> Self {
        Self {
            xmlns: DIDL_NAMESPACE.to_string(),
            xmlns_dc: DC_NAMESPACE.to_string(),
            xmlns_upnp: UPNP_NAMESPACE.to_string(),
            containers: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl DidlLite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre d'objets du document.
    pub fn len(&self) -> usize {
        self.containers.len() + self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sérialise le document en XML.
    pub fn to_xml(&self) -> Result<String, VfsError> {
        quick_xml::se::to_string(self).map_err(|e| VfsError::Didl(e.to_string()))
    }
}

/// Élément `<container>`.
#[derive(Debug, Clone, Serialize)]
pub struct DidlContainer {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID")]
    pub parent_id: String,

    #[serde(rename = "@childCount")]
    pub child_count: String,

    #[serde(rename = "@restricted")]
    pub restricted: String,

    #[serde(rename = "@searchable")]
    pub searchable: String,

    #[serde(rename = "upnp:class")]
    pub class: String,

    #[serde(rename = "dc:title")]
    pub title: String,
}

/// Élément `<item>`.
#[derive(Debug, Clone, Serialize)]
pub struct DidlItem {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID")]
    pub parent_id: String,

    #[serde(rename = "@restricted")]
    pub restricted: String,

    #[serde(rename = "dc:title")]
    pub title: String,

    #[serde(rename = "upnp:class", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(rename = "dc:creator", skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    #[serde(rename = "upnp:artist", skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(rename = "dc:description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "upnp:album", skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(
        rename = "upnp:originalTrackNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub track: Option<String>,

    #[serde(rename = "upnp:genre", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(rename = "res", skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<DidlRes>,
}

/// Élément `<res>`.
#[derive(Debug, Clone, Serialize)]
pub struct DidlRes {
    #[serde(rename = "@protocolInfo")]
    pub protocol_info: String,

    #[serde(rename = "@size", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(rename = "@bitrate", skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,

    #[serde(rename = "@bitsPerSample", skip_serializing_if = "Option::is_none")]
    pub bits_per_sample: Option<String>,

    #[serde(rename = "@nrAudioChannels", skip_serializing_if = "Option::is_none")]
    pub nr_audio_channels: Option<String>,

    #[serde(rename = "@duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(rename = "@resolution", skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    #[serde(rename = "$text")]
    pub url: String,
}

/// Construit l'élément `<res>` d'une ressource de transport, en ne
/// gardant que les attributs demandés par le filtre.
pub fn didl_res(resource: &VfsResource, filter: &Filter) -> DidlRes {
    let properties = resource.properties.as_ref();

    let keep_positive =
        |value: u32, attr: &str| -> Option<String> {
            (value > 0 && filter.has(attr)).then(|| value.to_string())
        };

    DidlRes {
        protocol_info: resource.didl_protocol_info(),
        size: (resource.size > 0 && filter.has("@size")).then(|| resource.size.to_string()),
        bitrate: properties.and_then(|p| keep_positive(p.bitrate, "@bitrate")),
        bits_per_sample: properties.and_then(|p| keep_positive(p.bits_per_sample, "@bitsPerSample")),
        nr_audio_channels: properties.and_then(|p| keep_positive(p.channels, "@nrAudioChannels")),
        duration: properties.and_then(|p| {
            (!p.duration.is_empty() && filter.has("@duration")).then(|| p.duration.clone())
        }),
        resolution: properties.and_then(|p| {
            (!p.resolution.is_empty() && filter.has("@resolution")).then(|| p.resolution.clone())
        }),
        url: resource.url(),
    }
}

/// Construit un élément `<item>` depuis un item média et ses ressources.
///
/// Titre, classe et attributs d'identité sont toujours émis ; les autres
/// champs passent par le filtre.
pub fn didl_item(
    id: u32,
    parent_id: Option<u32>,
    restricted: bool,
    item: &MediaItem,
    resources: &[VfsResource],
    filter: &Filter,
) -> DidlItem {
    let metadata = item.metadata.as_ref();
    let keep = |field: Option<&String>, name: &str| -> Option<String> {
        field.and_then(|value| filter.has(name).then(|| value.clone()))
    };

    let author = metadata.and_then(|meta| meta.author.as_ref());

    DidlItem {
        id: id.to_string(),
        parent_id: parent_id.map(|p| p.to_string()).unwrap_or_else(|| "-1".to_string()),
        restricted: if restricted { "1" } else { "0" }.to_string(),
        title: item.display_title().to_string(),
        class: item.profile().upnp_class().map(|class| class.to_string()),
        creator: keep(author, "dc:creator"),
        artist: keep(author, "upnp:artist"),
        description: keep(metadata.and_then(|meta| meta.comment.as_ref()), "dc:description"),
        album: keep(metadata.and_then(|meta| meta.album.as_ref()), "upnp:album"),
        track: metadata.and_then(|meta| meta.track).and_then(|track| {
            filter.has("upnp:originalTrackNumber").then(|| track.to_string())
        }),
        genre: keep(metadata.and_then(|meta| meta.genre.as_ref()), "upnp:genre"),
        resources: if filter.has("res") {
            resources.iter().map(|resource| didl_res(resource, filter)).collect()
        } else {
            Vec::new()
        },
    }
}

/// Document DIDL d'un item isolé, hors VFS (métadonnées de piste du
/// renderer). Pas d'élément `<res>`, parent `-1`.
pub fn single_item_document(id: u32, item: &MediaItem) -> Result<String, VfsError> {
    let mut didl = DidlLite::new();
    didl.items.push(didl_item(id, None, true, item, &[], &Filter::default()));
    didl.to_xml()
}
