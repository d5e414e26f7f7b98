//! # ContentDirectory:1
//!
//! Façade SOAP du VFS. Les actions obligatoires (Browse,
//! GetSearchCapabilities, GetSortCapabilities, GetSystemUpdateID) sont
//! implémentées, plus Search et GetFeatureList ; les actions de mutation
//! (CreateObject, ImportResource, …) sont déclarées sans callback et
//! répondent 401.
//!
//! `SystemUpdateID` est évènementiel : à chaque mutation du VFS,
//! [`CdsService::vfs_changed`] incrémente son compteur d'eventing et le
//! worker du dispatcher notifie les abonnés.

pub mod actions;
pub mod variables;

use dlnaupnp::{ActionEvent, ServiceDefinition, UpnpService};
use dlnavfs::SharedVfs;

/// Codes d'erreur SOAP du ContentDirectory.
#[allow(dead_code)]
pub(crate) mod error_codes {
    pub const INVALID_ACTION: u32 = 401;
    pub const INVALID_ARGS: u32 = 402;
    pub const ACTION_FAILED: u32 = 501;
    pub const INVALID_OBJECT_ID: u32 = 701;
    pub const INVALID_SEARCH_CRITERIA: u32 = 708;
    pub const INVALID_SORT_CRITERIA: u32 = 709;
    pub const INVALID_CONTAINER: u32 = 710;
    pub const PROCESS_REQUEST: u32 = 720;
}

pub const CDS_SERVICE_ID: &str = "urn:upnp-org:serviceId:ContentDirectory";
pub const CDS_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:ContentDirectory:1";

/// Service ContentDirectory adossé à un VFS partagé.
pub struct CdsService {
    definition: ServiceDefinition,
    vfs: SharedVfs,
    search_caps: String,
    features: Vec<String>,
}

impl CdsService {
    pub fn new(vfs: SharedVfs) -> Self {
        Self {
            definition: ServiceDefinition::new(
                CDS_SERVICE_ID,
                CDS_SERVICE_TYPE,
                "cds.xml",
                "cds_control",
                "cds_event",
                actions::action_table(),
                variables::variable_table(),
            ),
            vfs,
            search_caps: String::new(),
            features: Vec::new(),
        }
    }

    /// Capacités de recherche annoncées (vide par défaut).
    pub fn set_search_capabilities(&mut self, caps: &str) {
        self.search_caps = caps.to_string();
    }

    /// Déclare une feature listée par GetFeatureList.
    pub fn add_feature(&mut self, name: &str) {
        self.features.push(name.to_string());
    }

    pub fn vfs(&self) -> &SharedVfs {
        &self.vfs
    }

    /// À appeler après toute mutation du VFS : estampille
    /// `SystemUpdateID` pour le worker d'eventing.
    pub fn vfs_changed(&self) {
        if let Some(variable) = self.definition.find_variable("SystemUpdateID") {
            variable.request_event();
        }
    }

    fn system_update_id(&self) -> String {
        format!("{:010}", self.vfs.lock().system_update_id())
    }

    /// Document `<Features>` publié par GetFeatureList.
    fn feature_list(&self) -> String {
        use dlnautils::xml::element_to_inner_string;
        use xmltree::{Element, XMLNode};

        let mut features = Element::new("Features");
        features
            .attributes
            .insert("xmlns".to_string(), "urn:schemas-upnp-org:av:avs".to_string());
        features.attributes.insert(
            "xmlns:xsi".to_string(),
            "http://www.w3.org/2001/XMLSchema-instance".to_string(),
        );
        features.attributes.insert(
            "xsi:schemaLocation".to_string(),
            "urn:schemas-upnp-org:av:avs http://www.upnp.org/schemas/av/avs.xsd".to_string(),
        );
        for feature in &self.features {
            let mut elem = Element::new("Feature");
            elem.attributes.insert("name".to_string(), feature.clone());
            elem.attributes.insert("version".to_string(), "1".to_string());
            features.children.push(XMLNode::Element(elem));
        }
        element_to_inner_string(&features)
    }
}

impl UpnpService for CdsService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            "Browse" => actions::browse(self, ev),
            "Search" => actions::search(self, ev),
            "GetSearchCapabilities" => actions::get_search_capabilities(self, ev),
            "GetSortCapabilities" => actions::get_sort_capabilities(self, ev),
            "GetSystemUpdateID" => actions::get_system_update_id(self, ev),
            "GetFeatureList" => actions::get_feature_list(self, ev),
            _ => ev.set_error(error_codes::INVALID_ACTION, "Invalid Action"),
        }
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        match name {
            "SearchCapabilities" => Some(self.search_caps.clone()),
            "SortCapabilities" => Some("dc:title".to_string()),
            "SystemUpdateID" => Some(self.system_update_id()),
            "FeatureList" => Some(self.feature_list()),
            _ => None,
        }
    }
}
