//! Transport HTTP intégré.
//!
//! Pour chaque item du VFS, le protocole `http-get` fabrique une
//! ressource dont l'URL pointe sur le répertoire virtuel `/web` du
//! serveur d'origine : `http://<hôte>:<port>/web/<id><ext>`. Le handler
//! installé sur `/web` retrouve l'item par id et sert son flux avec le
//! MIME du profil. Le handler `/didl` exporte le document DIDL récursif
//! d'un container (`/didl?id=<n>`).

use std::sync::Arc;

use dlnaprofiler::MediaItem;
use dlnastream::web::{HttpHandler, WebHandlerChain};
use dlnastream::{DlnaStream, memory_open, stream_open};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::SharedVfs;
use crate::filter::Filter;
use crate::protocol::{DlnaProtocol, ProtocolInfo, VfsResource};

/// Répertoire virtuel des ressources média.
pub const VIRTUAL_DIR: &str = "/web";

/// Répertoire virtuel de l'export DIDL.
pub const DIDL_VIRTUAL_DIR: &str = "/didl";

/// Adresse du serveur d'origine, renseignée une fois l'adaptateur lié.
#[derive(Default)]
pub struct ServerLocation {
    inner: RwLock<(String, u16)>,
}

impl ServerLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ip: &str, port: u16) {
        *self.inner.write() = (ip.to_string(), port);
    }

    pub fn get(&self) -> (String, u16) {
        self.inner.read().clone()
    }
}

/// Protocole `http-get`.
pub struct HttpProtocol {
    location: Arc<ServerLocation>,
}

impl HttpProtocol {
    pub fn new(location: Arc<ServerLocation>) -> Self {
        Self { location }
    }
}

impl DlnaProtocol for HttpProtocol {
    fn name(&self) -> &str {
        "http-get"
    }

    fn create_resource(&self, id: u32, item: &MediaItem) -> VfsResource {
        let location = self.location.clone();
        let extension = item.profile().extension().to_string();
        let url_fn = Box::new(move || {
            let (ip, port) = location.get();
            if extension.is_empty() {
                format!("http://{}:{}{}/{}", ip, port, VIRTUAL_DIR, id)
            } else {
                format!("http://{}:{}{}/{}.{}", ip, port, VIRTUAL_DIR, id, extension)
            }
        });

        VfsResource::new(
            url_fn,
            ProtocolInfo {
                protocol: self.name().to_string(),
                network: self.net().to_string(),
                profile: item.profile().clone(),
                other: None,
            },
            item.filesize(),
            item.properties.clone(),
        )
    }

    fn init(&self, vfs: SharedVfs, web: &WebHandlerChain) {
        web.register(VIRTUAL_DIR, Arc::new(WebVirtualDir { vfs }));
    }
}

/// Handler du répertoire `/web` : sert une ressource par id.
struct WebVirtualDir {
    vfs: SharedVfs,
}

/// Id extrait d'une URL `/web/<id>[.<ext>]`.
fn resource_id(url: &str) -> Option<u32> {
    let page = url.strip_prefix(VIRTUAL_DIR)?.trim_start_matches('/');
    let digits: String = page.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl HttpHandler for WebVirtualDir {
    fn open(&self, url: &str) -> Option<DlnaStream> {
        let id = resource_id(url)?;
        let vfs = self.vfs.lock();
        let object = vfs.get_by_id(id)?;
        let resource = object.as_resource()?;

        debug!("🎧 serving resource #{} ({})", id, resource.item.filename());
        match stream_open(resource.item.filename()) {
            Ok(mut stream) => {
                stream.set_mime(resource.item.mime());
                Some(stream)
            }
            Err(e) => {
                warn!("cannot open resource #{}: {}", id, e);
                None
            }
        }
    }
}

/// Handler du répertoire `/didl` : export DIDL récursif d'un container.
struct DidlExport {
    vfs: SharedVfs,
}

impl HttpHandler for DidlExport {
    fn open(&self, url: &str) -> Option<DlnaStream> {
        let id = url
            .split_once("id=")
            .and_then(|(_, value)| {
                let digits: String =
                    value.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .unwrap_or(0);

        let vfs = self.vfs.lock();
        let result = vfs
            .search_direct_children(id, 0, 0, &Filter::default(), "object")
            .ok()?;
        Some(memory_open(url, result.didl.into_bytes(), "text/xml"))
    }
}

/// Publie l'export DIDL du VFS sur le serveur d'origine.
pub fn export_didl(vfs: SharedVfs, web: &WebHandlerChain) {
    web.register(DIDL_VIRTUAL_DIR, Arc::new(DidlExport { vfs }));
}
