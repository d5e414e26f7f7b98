//! # Assemblage du device UPnP
//!
//! Le device agrège les services, produit le descripteur XML publié par
//! SSDP et installe le répertoire virtuel `/services/*` qui sert les
//! documents SCPD.

use std::sync::Arc;

use dlnastream::web::{HttpHandler, WebHandlerChain};
use dlnastream::{DlnaStream, memory_open};
use dlnautils::xml::{append_text_child, element_to_string};
use tracing::debug;
use xmltree::{Element, XMLNode};

use crate::services::UpnpService;

/// Répertoire virtuel des descriptions de services.
pub const SERVICES_VIRTUAL_DIR: &str = "/services";

pub const DEVICE_TYPE_DMS: &str = "urn:schemas-upnp-org:device:MediaServer:1";
pub const DEVICE_TYPE_DMR: &str = "urn:schemas-upnp-org:device:MediaRenderer:1";

const XBOX_MODEL_NAME: &str = "Xbox 360";

/// Modes influant sur le descripteur.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceMode {
    pub dlna: bool,
    pub xbox: bool,
}

/// Device UPnP racine : identité + services.
pub struct Device {
    device_type: String,
    dlnadoc: Option<String>,
    mode: DeviceMode,
    friendly_name: String,
    manufacturer: String,
    manufacturer_url: Option<String>,
    model_description: Option<String>,
    model_name: String,
    model_number: Option<String>,
    model_url: Option<String>,
    serial_number: Option<String>,
    uuid: String,
    presentation_url: Option<String>,
    services: Vec<Arc<dyn UpnpService>>,
}

impl Device {
    /// Crée un device d'un type urn donné. Le document DLNA court
    /// (`DMS`, `DMR`) est déduit du type, ou repris de `short_doc`.
    pub fn new(device_type: &str, short_doc: Option<&str>, mode: DeviceMode) -> Self {
        let dlnadoc = if device_type == DEVICE_TYPE_DMS {
            Some("DMS".to_string())
        } else if device_type == DEVICE_TYPE_DMR {
            Some("DMR".to_string())
        } else {
            short_doc.map(|doc| doc.to_string())
        };

        Self {
            device_type: device_type.to_string(),
            dlnadoc,
            mode,
            friendly_name: "dlna device".to_string(),
            manufacturer: "dlna".to_string(),
            manufacturer_url: None,
            model_description: None,
            model_name: "dlna".to_string(),
            model_number: None,
            model_url: None,
            serial_number: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            presentation_url: None,
            services: Vec::new(),
        }
    }

    pub fn set_friendly_name(&mut self, name: &str) {
        self.friendly_name = name.to_string();
    }

    pub fn set_manufacturer(&mut self, name: &str) {
        self.manufacturer = name.to_string();
    }

    pub fn set_manufacturer_url(&mut self, url: &str) {
        self.manufacturer_url = Some(url.to_string());
    }

    pub fn set_model_description(&mut self, text: &str) {
        self.model_description = Some(text.to_string());
    }

    pub fn set_model_name(&mut self, name: &str) {
        self.model_name = name.to_string();
    }

    pub fn set_model_number(&mut self, number: &str) {
        self.model_number = Some(number.to_string());
    }

    pub fn set_model_url(&mut self, url: &str) {
        self.model_url = Some(url.to_string());
    }

    pub fn set_serial_number(&mut self, serial: &str) {
        self.serial_number = Some(serial.to_string());
    }

    pub fn set_uuid(&mut self, uuid: &str) {
        self.uuid = uuid.to_string();
    }

    pub fn set_presentation_url(&mut self, url: &str) {
        self.presentation_url = Some(url.to_string());
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    /// UDN du device : `uuid:<uuid>`.
    pub fn udn(&self) -> String {
        format!("uuid:{}", self.uuid)
    }

    pub fn add_service(&mut self, service: Arc<dyn UpnpService>) {
        self.services.push(service);
    }

    pub fn services(&self) -> &[Arc<dyn UpnpService>] {
        &self.services
    }

    /// Recherche d'un service par son id (`urn:upnp-org:serviceId:…`).
    pub fn find_service(&self, service_id: &str) -> Option<&Arc<dyn UpnpService>> {
        self.services
            .iter()
            .find(|service| service.definition().id == service_id)
    }

    /// Recherche d'un service par le chemin de son SCPD.
    pub fn find_service_by_scpd_url(&self, scpd_url: &str) -> Option<&Arc<dyn UpnpService>> {
        self.services
            .iter()
            .find(|service| service.definition().scpd_url == scpd_url)
    }

    /// Descripteur XML du device, publié par la pile UPnP.
    pub fn description_xml(&self) -> String {
        let mut root = Element::new("root");
        root.attributes.insert(
            "xmlns".to_string(),
            "urn:schemas-upnp-org:device-1-0".to_string(),
        );

        let mut spec_version = Element::new("specVersion");
        append_text_child(&mut spec_version, "major", "1");
        append_text_child(&mut spec_version, "minor", "0");
        root.children.push(XMLNode::Element(spec_version));

        let mut device = Element::new("device");
        append_text_child(&mut device, "deviceType", &self.device_type);
        append_text_child(&mut device, "friendlyName", &self.friendly_name);
        append_text_child(&mut device, "manufacturer", &self.manufacturer);
        if let Some(url) = &self.manufacturer_url {
            append_text_child(&mut device, "manufacturerURL", url);
        }
        if let Some(text) = &self.model_description {
            append_text_child(&mut device, "modelDescription", text);
        }

        let model_name = if self.mode.xbox {
            format!("{} ({})", XBOX_MODEL_NAME, self.model_name)
        } else {
            self.model_name.clone()
        };
        append_text_child(&mut device, "modelName", &model_name);

        if let Some(number) = &self.model_number {
            append_text_child(&mut device, "modelNumber", number);
        }
        if let Some(url) = &self.model_url {
            append_text_child(&mut device, "modelURL", url);
        }
        if let Some(serial) = &self.serial_number {
            append_text_child(&mut device, "serialNumber", serial);
        }
        append_text_child(&mut device, "UDN", &self.udn());
        if let Some(url) = &self.presentation_url {
            append_text_child(&mut device, "presentationURL", url);
        }

        if self.mode.dlna {
            if let Some(doc) = &self.dlnadoc {
                device.children.push(XMLNode::Element(dlnadoc_element(doc, false)));
                if self.mode.xbox {
                    device.children.push(XMLNode::Element(dlnadoc_element(doc, true)));
                }
            }
        }

        let mut service_list = Element::new("serviceList");
        for service in &self.services {
            let definition = service.definition();
            let mut service_elem = Element::new("service");
            append_text_child(&mut service_elem, "serviceType", &definition.service_type);
            append_text_child(&mut service_elem, "serviceId", &definition.id);
            append_text_child(
                &mut service_elem,
                "SCPDURL",
                &format!("{}/{}", SERVICES_VIRTUAL_DIR, definition.scpd_url),
            );
            append_text_child(
                &mut service_elem,
                "controlURL",
                &format!("{}/{}", SERVICES_VIRTUAL_DIR, definition.control_url),
            );
            append_text_child(
                &mut service_elem,
                "eventSubURL",
                &format!("{}/{}", SERVICES_VIRTUAL_DIR, definition.event_url),
            );
            service_list.children.push(XMLNode::Element(service_elem));
        }
        device.children.push(XMLNode::Element(service_list));

        root.children.push(XMLNode::Element(device));
        element_to_string(&root)
    }
}

fn dlnadoc_element(doc: &str, xbox_m: bool) -> Element {
    let mut elem = Element::new("dlna:X_DLNADOC");
    elem.attributes.insert(
        "xmlns:dlna".to_string(),
        "urn:schemas-dlna-org:device-1-0".to_string(),
    );
    let value = if xbox_m {
        format!("M-{}-1.00", doc)
    } else {
        format!("{}-1.00", doc)
    };
    elem.children.push(XMLNode::Text(value));
    elem
}

/// Handler `/services/*` : sert le SCPD du service désigné par l'URL.
struct ServicesVirtualDir {
    device: Arc<Device>,
}

impl HttpHandler for ServicesVirtualDir {
    fn open(&self, url: &str) -> Option<DlnaStream> {
        let path = url
            .strip_prefix(SERVICES_VIRTUAL_DIR)?
            .trim_start_matches('/');
        let service = self.device.find_service_by_scpd_url(path)?;
        debug!("📄 serving scpd {}", path);
        Some(memory_open(
            url,
            service.definition().scpd_xml().into_bytes(),
            "text/xml",
        ))
    }
}

/// Installe le répertoire `/services` sur le serveur d'origine.
pub fn register_services_dir(device: Arc<Device>, web: &WebHandlerChain) {
    web.register(SERVICES_VIRTUAL_DIR, Arc::new(ServicesVirtualDir { device }));
}
