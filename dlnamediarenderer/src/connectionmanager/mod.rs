//! # ConnectionManager:1 (côté renderer)
//!
//! Le renderer annonce en `Sink` un `protocolInfo` `http-get:*:<mime>:*`
//! par type MIME que la chaîne de profilers sait identifier ; sa liste
//! `Source` est vide.

use dlnaprofiler::ProfilerRegistry;
use dlnaupnp::{
    ActionEvent, ServiceAction, ServiceDefinition, StateVariable, UpnpService, VarType,
};
use tracing::debug;

pub const CMS_SERVICE_ID: &str = "urn:upnp-org:serviceId:ConnectionManager";
pub const CMS_SERVICE_TYPE: &str = "urn:schemas-upnp-org:service:ConnectionManager:1";

static CONNECTION_STATUS_ALLOWED: &[&str] = &[
    "OK",
    "ContentFormatMismatch",
    "InsufficientBandwidth",
    "UnreliableChannel",
    "Unknown",
];
static DIRECTION_ALLOWED: &[&str] = &["Input", "Output"];

/// ConnectionManager du renderer : les sinks viennent des profilers.
pub struct CmsService {
    definition: ServiceDefinition,
    sinks: Vec<String>,
}

impl CmsService {
    pub fn from_registry(registry: &ProfilerRegistry) -> Self {
        let sinks = registry
            .supported_mime_types()
            .into_iter()
            .map(|mime| format!("http-get:*:{}:*", mime))
            .collect();
        Self { definition: Self::definition(), sinks }
    }

    fn definition() -> ServiceDefinition {
        ServiceDefinition::new(
            CMS_SERVICE_ID,
            CMS_SERVICE_TYPE,
            "cms.xml",
            "cms_control",
            "cms_event",
            vec![
                ServiceAction::new("GetProtocolInfo")
                    .arg_out("Source", "SourceProtocolInfo")
                    .arg_out("Sink", "SinkProtocolInfo"),
                ServiceAction::stub("PrepareForConnection"),
                ServiceAction::stub("ConnectionComplete"),
                ServiceAction::new("GetCurrentConnectionIDs")
                    .arg_out("ConnectionIDs", "CurrentConnectionIDs"),
                ServiceAction::new("GetCurrentConnectionInfo")
                    .arg_in("ConnectionID", "A_ARG_TYPE_ConnectionID")
                    .arg_out("RcsID", "A_ARG_TYPE_RcsID")
                    .arg_out("AVTransportID", "A_ARG_TYPE_AVTransportID")
                    .arg_out("ProtocolInfo", "A_ARG_TYPE_ProtocolInfo")
                    .arg_out("PeerConnectionManager", "A_ARG_TYPE_ConnectionManager")
                    .arg_out("PeerConnectionID", "A_ARG_TYPE_ConnectionID")
                    .arg_out("Direction", "A_ARG_TYPE_Direction")
                    .arg_out("Status", "A_ARG_TYPE_ConnectionStatus"),
            ],
            vec![
                StateVariable::new("SourceProtocolInfo", VarType::String).evented(),
                StateVariable::new("SinkProtocolInfo", VarType::String).evented(),
                StateVariable::new("CurrentConnectionIDs", VarType::String).evented(),
                StateVariable::new("A_ARG_TYPE_ConnectionStatus", VarType::String)
                    .allowed(CONNECTION_STATUS_ALLOWED),
                StateVariable::new("A_ARG_TYPE_ConnectionManager", VarType::String),
                StateVariable::new("A_ARG_TYPE_Direction", VarType::String)
                    .allowed(DIRECTION_ALLOWED),
                StateVariable::new("A_ARG_TYPE_ProtocolInfo", VarType::String),
                StateVariable::new("A_ARG_TYPE_ConnectionID", VarType::I4),
                StateVariable::new("A_ARG_TYPE_AVTransportID", VarType::I4),
                StateVariable::new("A_ARG_TYPE_RcsID", VarType::I4),
            ],
        )
    }

    fn sink_list(&self) -> String {
        self.sinks.join(",")
    }
}

impl UpnpService for CmsService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            "GetProtocolInfo" => {
                debug!("🔌 GetProtocolInfo: {} sink(s)", self.sinks.len());
                ev.add_response("Source", "");
                ev.add_response("Sink", self.sink_list());
            }
            "GetCurrentConnectionIDs" => {
                ev.add_response("ConnectionIDs", "");
            }
            "GetCurrentConnectionInfo" => {
                ev.add_response("ConnectionID", "0");
                ev.add_response("RcsID", "-1");
                ev.add_response("AVTransportID", "-1");
                for sink in &self.sinks {
                    ev.add_response("ProtocolInfo", sink.clone());
                }
                ev.add_response("PeerConnectionManager", "");
                ev.add_response("PeerConnectionID", "-1");
                ev.add_response("Direction", "Output");
                ev.add_response("Status", "OK");
            }
            _ => ev.set_error(401, "Invalid Action"),
        }
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        match name {
            "SourceProtocolInfo" => Some(String::new()),
            "SinkProtocolInfo" => Some(self.sink_list()),
            "CurrentConnectionIDs" => Some(String::new()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnaupnp::soap_request;

    #[test]
    fn test_sinks_from_profilers() {
        let registry = ProfilerRegistry::new();
        let cms = CmsService::from_registry(&registry);

        let request = soap_request("GetProtocolInfo", &[]);
        let mut ev = ActionEvent::new(&request);
        cms.invoke("GetProtocolInfo", &mut ev);

        let (responses, error) = ev.into_parts();
        assert!(error.is_none());
        let sink = &responses.iter().find(|(key, _)| key == "Sink").unwrap().1;
        // La table d'extensions publie au moins les formats audio usuels
        assert!(sink.contains("http-get:*:audio/mpeg:*"));
        assert!(sink.contains("http-get:*:audio/x-flac:*"));
    }
}
