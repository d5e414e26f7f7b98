//! Tests d'intégration du ConnectionManager côté serveur.

use std::sync::Arc;

use dlnaprofiler::{MediaClass, MediaItem, MediaProfile};
use dlnaupnp::{ActionEvent, UpnpService, soap_request};
use dlnavfs::{HttpProtocol, ServerLocation, Vfs, VfsMode, shared};
use dlnamediaserver::CmsService;

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

fn cms_with_one_source() -> CmsService {
    let location = Arc::new(ServerLocation::new());
    location.set("127.0.0.1", 4004);
    let mut vfs = Vfs::new(VfsMode { dlna: true, xbox: false });
    vfs.add_protocol(Arc::new(HttpProtocol::new(location)));
    let folder = vfs.add_container("Music", 0, 0);
    vfs.add_resource(
        "a.mp3",
        MediaItem::new("/m/a.mp3".to_string(), 1, Arc::new(Mp3Profile)),
        folder,
    );
    CmsService::new(shared(vfs))
}

fn invoke(service: &CmsService, action: &str) -> Vec<(String, String)> {
    let request = soap_request(action, &[]);
    let mut ev = ActionEvent::new(&request);
    service.invoke(action, &mut ev);
    assert!(ev.error().is_none(), "{action} failed");
    let (responses, _) = ev.into_parts();
    responses
}

fn response<'a>(responses: &'a [(String, String)], name: &str) -> &'a str {
    responses
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap()
}

#[test]
fn test_get_protocol_info() {
    let cms = cms_with_one_source();
    let responses = invoke(&cms, "GetProtocolInfo");
    let source = response(&responses, "Source");
    assert!(source.starts_with("http-get:*:audio/mpeg:"));
    assert!(source.contains("DLNA.ORG_PN=MP3"));
    assert_eq!(response(&responses, "Sink"), "");
}

#[test]
fn test_get_current_connection_ids_empty() {
    let cms = cms_with_one_source();
    let responses = invoke(&cms, "GetCurrentConnectionIDs");
    assert_eq!(response(&responses, "ConnectionIDs"), "");
}

#[test]
fn test_get_current_connection_info_defaults() {
    let cms = cms_with_one_source();
    let responses = invoke(&cms, "GetCurrentConnectionInfo");
    assert_eq!(response(&responses, "ConnectionID"), "0");
    assert_eq!(response(&responses, "RcsID"), "-1");
    assert_eq!(response(&responses, "AVTransportID"), "-1");
    assert_eq!(response(&responses, "Direction"), "Output");
    assert_eq!(response(&responses, "Status"), "OK");
}
