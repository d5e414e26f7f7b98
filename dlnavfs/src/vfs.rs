//! Arbre d'objets du ContentDirectory.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use dlnaprofiler::{MediaClass, MediaItem};
use tracing::{debug, info, warn};

use crate::didl::{DidlContainer, DidlLite, didl_item};
use crate::errors::VfsError;
use crate::filter::Filter;
use crate::protocol::{DlnaProtocol, VfsResource, dlna_org_other};
use crate::search;

/// Base des ids en mode d'interopérabilité Xbox 360.
const STARTING_ENTRY_ID_XBOX360: u32 = 100_000;

/// Modes influant sur le VFS.
#[derive(Debug, Clone, Copy, Default)]
pub struct VfsMode {
    /// Mode DLNA strict : champ `other` DLNA sur les ressources profilées.
    pub dlna: bool,
    /// Quirk Xbox 360 : base d'allocation des ids décalée.
    pub xbox: bool,
}

/// Container : nœud interne de l'arbre.
#[derive(Debug)]
pub struct Container {
    pub title: String,
    pub class: MediaClass,
    pub children: Vec<u32>,
    pub update_id: u32,
}

/// Ressource : feuille portant un item média et ses ressources de
/// transport (une par protocole enregistré, générées à l'insertion).
pub struct Resource {
    pub item: MediaItem,
    pub resources: Vec<VfsResource>,
}

/// Les deux variantes d'objet du VFS.
pub enum VfsObjectKind {
    Container(Container),
    Resource(Resource),
}

/// Objet du VFS : id stable, lien parent, variante.
pub struct VfsObject {
    pub id: u32,
    pub parent: Option<u32>,
    pub restricted: bool,
    pub kind: VfsObjectKind,
}

impl VfsObject {
    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            VfsObjectKind::Container(container) => Some(container),
            VfsObjectKind::Resource(_) => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match &self.kind {
            VfsObjectKind::Resource(resource) => Some(resource),
            VfsObjectKind::Container(_) => None,
        }
    }

    /// Titre affichable de l'objet.
    pub fn title(&self) -> &str {
        match &self.kind {
            VfsObjectKind::Container(container) => &container.title,
            VfsObjectKind::Resource(resource) => resource.item.display_title(),
        }
    }
}

/// Résultat d'un Browse ou d'un Search : document DIDL + compteurs.
#[derive(Debug, Clone)]
pub struct DidlResult {
    pub didl: String,
    pub number_returned: u32,
    pub total_matches: u32,
    pub update_id: u32,
}

/// Le système de fichiers virtuel.
///
/// Arbre enraciné à l'id 0, possédé par une arène `id → objet` ; chaque
/// container garde la liste ordonnée des ids de ses enfants. Les ids sont
/// stables jusqu'au retrait de l'objet.
pub struct Vfs {
    objects: HashMap<u32, VfsObject>,
    mode: VfsMode,
    protocols: Vec<Arc<dyn DlnaProtocol>>,
    sources: Vec<String>,
}

impl Vfs {
    pub fn new(mode: VfsMode) -> Self {
        let mut vfs = Self {
            objects: HashMap::new(),
            mode,
            protocols: Vec::new(),
            sources: Vec::new(),
        };
        vfs.objects.insert(
            0,
            VfsObject {
                id: 0,
                parent: None,
                restricted: true,
                kind: VfsObjectKind::Container(Container {
                    title: "root".to_string(),
                    class: MediaClass::Folder,
                    children: Vec::new(),
                    update_id: 0,
                }),
            },
        );
        vfs
    }

    pub fn mode(&self) -> VfsMode {
        self.mode
    }

    /// Branche un protocole de transport. Les ressources des items déjà
    /// insérés ne sont pas régénérées : brancher les protocoles d'abord.
    pub fn add_protocol(&mut self, protocol: Arc<dyn DlnaProtocol>) {
        self.protocols.push(protocol);
    }

    /// Liste `protocolInfo` des sources exposée par le ConnectionManager.
    pub fn iter_sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.as_str())
    }

    /// Nombre d'objets, racine comprise.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get_by_id(&self, id: u32) -> Option<&VfsObject> {
        self.objects.get(&id)
    }

    /// Recherche par titre : titre de container, titre de métadonnée ou
    /// nom de fichier d'une ressource.
    pub fn get_by_name(&self, name: &str) -> Option<&VfsObject> {
        self.objects.values().find(|object| match &object.kind {
            VfsObjectKind::Container(container) => container.title == name,
            VfsObjectKind::Resource(resource) => {
                resource.item.display_title() == name || resource.item.basename() == name
            }
        })
    }

    /// `updateID` du container racine, publié comme SystemUpdateID.
    pub fn system_update_id(&self) -> u32 {
        self.get_by_id(0)
            .and_then(VfsObject::as_container)
            .map(|container| container.update_id)
            .unwrap_or(0)
    }

    fn is_id_registered(&self, id: u32) -> bool {
        self.objects.contains_key(&id)
    }

    /// Alloue un id libre : base 1 (100001 en mode Xbox), combinée par
    /// CRC-32 avec l'indice de chemin quand il y en a un, jusqu'à un id
    /// inutilisé.
    fn provide_next_id(&self, path_hint: Option<&str>) -> u32 {
        let start = if self.mode.xbox {
            STARTING_ENTRY_ID_XBOX360 + 1
        } else {
            1
        };

        let mut seed = start;
        loop {
            let candidate = match path_hint {
                Some(hint) => {
                    let mut hasher = crc32fast::Hasher::new_with_initial(seed);
                    hasher.update(hint.as_bytes());
                    hasher.finalize()
                }
                None => seed,
            };
            if candidate != 0 && !self.is_id_registered(candidate) {
                return candidate;
            }
            seed = seed.wrapping_add(1);
        }
    }

    /// Incrémente l'`updateID` d'un container et propage la modification
    /// à ses ancêtres jusqu'à la racine.
    fn bump_update_id(&mut self, mut id: u32) {
        loop {
            let parent = match self.objects.get_mut(&id) {
                Some(VfsObject { kind: VfsObjectKind::Container(container), parent, .. }) => {
                    container.update_id += 1;
                    *parent
                }
                _ => None,
            };
            match parent {
                Some(parent_id) => id = parent_id,
                None => break,
            }
        }
    }

    fn attach(&mut self, id: u32, parent_id: u32) {
        let parent_id = if self.is_id_registered(parent_id) { parent_id } else { 0 };
        if let Some(object) = self.objects.get_mut(&id) {
            object.parent = Some(parent_id);
        }
        if let Some(VfsObject { kind: VfsObjectKind::Container(container), .. }) =
            self.objects.get_mut(&parent_id)
        {
            if !container.children.contains(&id) {
                container.children.push(id);
            }
        }
        self.bump_update_id(parent_id);
    }

    /// Ajoute un container sous `parent_id`.
    ///
    /// `requested_id == 0` alloue un id frais ; un id demandé déjà
    /// enregistré rend l'appel idempotent.
    pub fn add_container(&mut self, name: &str, requested_id: u32, parent_id: u32) -> u32 {
        info!("📁 adding container '{}'", name);

        let basename = Path::new(name)
            .file_name()
            .map(|base| base.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string());

        let id = if requested_id == 0 {
            self.provide_next_id(Some(&basename))
        } else if self.is_id_registered(requested_id) {
            return requested_id;
        } else {
            requested_id
        };

        let class = if Path::new(name).is_dir() {
            MediaClass::Folder
        } else {
            MediaClass::Collection
        };

        self.objects.insert(
            id,
            VfsObject {
                id,
                parent: None,
                restricted: true,
                kind: VfsObjectKind::Container(Container {
                    title: basename,
                    class,
                    children: Vec::new(),
                    update_id: 0,
                }),
            },
        );
        self.attach(id, parent_id);

        debug!("new container id (asked for #{}, granted #{})", requested_id, id);
        id
    }

    /// Ajoute une ressource sous `parent_id`. Une ressource de transport
    /// est générée pour chaque protocole enregistré ; en mode DLNA les
    /// items profilés reçoivent le champ `other` DLNA. Chaque
    /// `protocolInfo` alimente aussi la liste des sources du
    /// ConnectionManager.
    pub fn add_resource(&mut self, name: &str, item: MediaItem, parent_id: u32) -> u32 {
        let id = self.provide_next_id(Some(item.filename()));
        info!("🎵 new resource #{} '{}' ({})", id, name, item.filename());

        let mut resources = Vec::new();
        for protocol in &self.protocols {
            let mut resource = protocol.create_resource(id, &item);
            if self.mode.dlna && !resource.protocol_info.profile.id().is_empty() {
                resource.protocol_info.other =
                    Some(dlna_org_other(resource.protocol_info.profile.id()));
            }
            let source = resource.protocol_info.to_protocol_string();
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
            resources.push(resource);
        }

        self.objects.insert(
            id,
            VfsObject {
                id,
                parent: None,
                restricted: true,
                kind: VfsObjectKind::Resource(Resource { item, resources }),
            },
        );
        self.attach(id, parent_id);
        id
    }

    /// Retire un objet et tout son sous-arbre ; l'id redevient libre.
    pub fn remove_by_id(&mut self, id: u32) {
        if id == 0 {
            warn!("refusing to remove the root container");
            return;
        }
        let Some(object) = self.objects.get(&id) else {
            return;
        };
        info!("🗑️ removing item #{}", id);

        let parent = object.parent;
        self.free_subtree(id);

        if let Some(parent_id) = parent {
            if let Some(VfsObject { kind: VfsObjectKind::Container(container), .. }) =
                self.objects.get_mut(&parent_id)
            {
                container.children.retain(|child| *child != id);
            }
            self.bump_update_id(parent_id);
        }
    }

    /// Retire un objet trouvé par titre.
    pub fn remove_by_title(&mut self, name: &str) {
        if let Some(id) = self.get_by_name(name).map(|object| object.id) {
            self.remove_by_id(id);
        }
    }

    fn free_subtree(&mut self, id: u32) {
        if let Some(object) = self.objects.remove(&id) {
            if let VfsObjectKind::Container(container) = object.kind {
                for child in container.children {
                    self.free_subtree(child);
                }
            }
        }
    }

    /// Enfants d'un container triés pour Browse : containers d'abord,
    /// puis ressources, chaque groupe par titre sans casse. Les critères
    /// de tri autres que le défaut produisent ce même ordre de base.
    fn sorted_children(&self, container: &Container, _sort: &str) -> Vec<u32> {
        let mut containers: Vec<&VfsObject> = Vec::new();
        let mut resources: Vec<&VfsObject> = Vec::new();
        for child_id in &container.children {
            match self.objects.get(child_id) {
                Some(object @ VfsObject { kind: VfsObjectKind::Container(_), .. }) => {
                    containers.push(object)
                }
                Some(object @ VfsObject { kind: VfsObjectKind::Resource(_), .. }) => {
                    resources.push(object)
                }
                None => {}
            }
        }
        let by_title = |a: &&VfsObject, b: &&VfsObject| {
            a.title().to_lowercase().cmp(&b.title().to_lowercase())
        };
        containers.sort_by(by_title);
        resources.sort_by(by_title);

        containers
            .into_iter()
            .chain(resources)
            .map(|object| object.id)
            .collect()
    }

    fn didl_container(&self, object: &VfsObject, searchable: bool) -> Option<DidlContainer> {
        let container = object.as_container()?;
        Some(DidlContainer {
            id: object.id.to_string(),
            parent_id: object
                .parent
                .map(|parent| parent.to_string())
                .unwrap_or_else(|| "-1".to_string()),
            child_count: container.children.len().to_string(),
            restricted: if object.restricted { "1" } else { "0" }.to_string(),
            searchable: if searchable { "1" } else { "0" }.to_string(),
            class: container
                .class
                .upnp_class()
                .unwrap_or("object.container.storageFolder")
                .to_string(),
            title: container.title.clone(),
        })
    }

    fn append_object(&self, didl: &mut DidlLite, object: &VfsObject, filter: &Filter) {
        match &object.kind {
            VfsObjectKind::Container(_) => {
                if let Some(elem) = self.didl_container(object, false) {
                    didl.containers.push(elem);
                }
            }
            VfsObjectKind::Resource(resource) => {
                didl.items.push(didl_item(
                    object.id,
                    object.parent,
                    object.restricted,
                    &resource.item,
                    &resource.resources,
                    filter,
                ));
            }
        }
    }

    /// BrowseMetadata : l'objet lui-même.
    pub fn browse_metadata(&self, id: u32, filter: &Filter) -> Result<DidlResult, VfsError> {
        let object = self.get_by_id(id).ok_or(VfsError::UnknownObject(id))?;

        let mut didl = DidlLite::new();
        let update_id = match &object.kind {
            VfsObjectKind::Resource(_) => {
                self.append_object(&mut didl, object, filter);
                self.system_update_id()
            }
            VfsObjectKind::Container(container) => {
                if let Some(elem) = self.didl_container(object, true) {
                    didl.containers.push(elem);
                }
                container.update_id
            }
        };

        Ok(DidlResult {
            didl: didl.to_xml()?,
            number_returned: 1,
            total_matches: 1,
            update_id,
        })
    }

    /// BrowseDirectChildren : tranche triée des enfants d'un container.
    /// `count == 0` retourne tout à partir de `start`.
    pub fn browse_direct_children(
        &self,
        id: u32,
        start: u32,
        count: u32,
        filter: &Filter,
        sort: &str,
    ) -> Result<DidlResult, VfsError> {
        let object = self.get_by_id(id).ok_or(VfsError::UnknownObject(id))?;
        let container = object.as_container().ok_or(VfsError::NotContainer(id))?;

        let children = self.sorted_children(container, sort);
        let mut didl = DidlLite::new();
        let mut returned = 0u32;
        for child_id in children.iter().skip(start as usize) {
            if count > 0 && returned >= count {
                break;
            }
            if let Some(child) = self.objects.get(child_id) {
                self.append_object(&mut didl, child, filter);
                returned += 1;
            }
        }

        Ok(DidlResult {
            didl: didl.to_xml()?,
            number_returned: returned,
            total_matches: container.children.len() as u32,
            update_id: container.update_id,
        })
    }

    /// Search : descente récursive depuis un container, confrontant
    /// chaque ressource aux critères. `total_matches` compte toutes les
    /// correspondances, `count == 0` ne borne pas le retour.
    pub fn search_direct_children(
        &self,
        id: u32,
        start: u32,
        count: u32,
        filter: &Filter,
        criteria: &str,
    ) -> Result<DidlResult, VfsError> {
        let object = self.get_by_id(id).ok_or(VfsError::UnknownObject(id))?;
        let container = object.as_container().ok_or(VfsError::NotContainer(id))?;

        let mut didl = DidlLite::new();
        let mut returned = 0u32;
        let mut total = 0u32;
        let mut skipped = 0u32;
        self.search_recursive(
            container,
            criteria,
            filter,
            start,
            count,
            &mut didl,
            &mut returned,
            &mut total,
            &mut skipped,
        );

        Ok(DidlResult {
            didl: didl.to_xml()?,
            number_returned: returned,
            total_matches: total,
            update_id: container.update_id,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn search_recursive(
        &self,
        container: &Container,
        criteria: &str,
        filter: &Filter,
        start: u32,
        count: u32,
        didl: &mut DidlLite,
        returned: &mut u32,
        total: &mut u32,
        skipped: &mut u32,
    ) {
        for child_id in &container.children {
            match self.objects.get(child_id) {
                Some(VfsObject { kind: VfsObjectKind::Container(child), .. }) => {
                    self.search_recursive(
                        child, criteria, filter, start, count, didl, returned, total, skipped,
                    );
                }
                Some(object @ VfsObject { kind: VfsObjectKind::Resource(resource), .. }) => {
                    if search::matches(resource, criteria) {
                        *total += 1;
                        if *skipped < start {
                            *skipped += 1;
                        } else if count == 0 || *returned < count {
                            self.append_object(didl, object, filter);
                            *returned += 1;
                        }
                    }
                }
                None => {}
            }
        }
    }
}
