//! # ConnectionManager:1 (côté serveur)
//!
//! Publie la liste `Source` des `protocolInfo` du VFS (alimentée à chaque
//! insertion de ressource) ; la liste `Sink` d'un serveur est vide. La
//! connexion par défaut `0` est rapportée par GetCurrentConnectionInfo.

pub mod actions;
pub mod variables;

use dlnaupnp::{ActionEvent, ServiceDefinition, UpnpService};
use dlnavfs::SharedVfs;

pub const CMS_SERVICE_ID: &str = "urn:upnp-org:serviceId:ConnectionManager";
pub const CMS_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:ConnectionManager:1";

pub(crate) const CMS_ERR_INVALID_ACTION: u32 = 401;

/// Service ConnectionManager du serveur.
pub struct CmsService {
    definition: ServiceDefinition,
    vfs: Option<SharedVfs>,
    sinks: Vec<String>,
}

impl CmsService {
    /// CMS d'un Media Server : sources tirées du VFS.
    pub fn new(vfs: SharedVfs) -> Self {
        Self {
            definition: Self::definition(),
            vfs: Some(vfs),
            sinks: Vec::new(),
        }
    }

    fn definition() -> ServiceDefinition {
        ServiceDefinition::new(
            CMS_SERVICE_ID,
            CMS_SERVICE_TYPE,
            "cms.xml",
            "cms_control",
            "cms_event",
            actions::action_table(),
            variables::variable_table(),
        )
    }

    /// Liste CSV des `protocolInfo` sources.
    pub(crate) fn source_list(&self) -> String {
        match &self.vfs {
            Some(vfs) => vfs.lock().iter_sources().collect::<Vec<_>>().join(","),
            None => String::new(),
        }
    }

    /// Liste CSV des `protocolInfo` acceptés en entrée.
    pub(crate) fn sink_list(&self) -> String {
        self.sinks.join(",")
    }

    pub(crate) fn sinks(&self) -> &[String] {
        &self.sinks
    }
}

impl UpnpService for CmsService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            "GetProtocolInfo" => actions::get_protocol_info(self, ev),
            "GetCurrentConnectionIDs" => actions::get_current_connection_ids(self, ev),
            "GetCurrentConnectionInfo" => actions::get_current_connection_info(self, ev),
            _ => ev.set_error(CMS_ERR_INVALID_ACTION, "Invalid Action"),
        }
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        match name {
            "SourceProtocolInfo" => Some(self.source_list()),
            "SinkProtocolInfo" => Some(self.sink_list()),
            "CurrentConnectionIDs" => Some(String::new()),
            _ => None,
        }
    }
}
