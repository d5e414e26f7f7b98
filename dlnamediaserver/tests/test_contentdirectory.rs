//! Tests d'intégration du ContentDirectory : Browse, Search, compteurs.

use std::sync::Arc;

use dlnaprofiler::{MediaClass, MediaItem, MediaProfile, Metadata};
use dlnaupnp::{ActionEvent, UpnpService, soap_request};
use dlnavfs::{HttpProtocol, ServerLocation, SharedVfs, Vfs, VfsMode, shared};
use dlnamediaserver::CdsService;

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
    fn extension(&self) -> &str {
        "mp3"
    }
}

fn audio_item(path: &str, title: &str) -> MediaItem {
    let mut item = MediaItem::new(path.to_string(), 4096, Arc::new(Mp3Profile));
    item.metadata = Some(Metadata {
        title: Some(title.to_string()),
        ..Metadata::default()
    });
    item
}

/// VFS du scénario : root(0) → Folder(100) → deux items titrés α et β.
fn two_file_vfs() -> SharedVfs {
    let location = Arc::new(ServerLocation::new());
    location.set("127.0.0.1", 4004);
    let mut vfs = Vfs::new(VfsMode { dlna: true, xbox: false });
    vfs.add_protocol(Arc::new(HttpProtocol::new(location)));

    let folder = vfs.add_container("Music", 100, 0);
    assert_eq!(folder, 100);
    vfs.add_resource("b.mp3", audio_item("/m/b.mp3", "β"), folder);
    vfs.add_resource("a.mp3", audio_item("/m/a.mp3", "α"), folder);
    shared(vfs)
}

fn invoke(service: &CdsService, action: &str, args: &[(&str, &str)]) -> ActionOutcomeLike {
    let request = soap_request(action, args);
    let mut ev = ActionEvent::new(&request);
    service.invoke(action, &mut ev);
    let (responses, error) = ev.into_parts();
    ActionOutcomeLike { responses, error }
}

struct ActionOutcomeLike {
    responses: Vec<(String, String)>,
    error: Option<(u32, String)>,
}

impl ActionOutcomeLike {
    fn response(&self, name: &str) -> &str {
        self.responses
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_else(|| panic!("missing response argument {name}"))
    }
}

#[test]
fn test_browse_two_file_folder() {
    // Browse direct children du dossier aux deux items titrés
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(
        &cds,
        "Browse",
        &[
            ("ObjectID", "100"),
            ("BrowseFlag", "BrowseDirectChildren"),
            ("Filter", "*"),
            ("StartingIndex", "0"),
            ("RequestedCount", "0"),
            ("SortCriteria", "+dc:title"),
        ],
    );

    assert!(outcome.error.is_none());
    assert_eq!(outcome.response("NumberReturned"), "0000000002");
    assert_eq!(outcome.response("TotalMatches"), "0000000002");
    let update_id: u32 = outcome.response("UpdateID").parse().unwrap();
    assert!(update_id >= 1);

    let didl = outcome.response("Result");
    assert_eq!(didl.matches("<item").count(), 2);
    let alpha = didl.find("α").unwrap();
    let beta = didl.find("β").unwrap();
    assert!(alpha < beta, "items must be in title order");
}

#[test]
fn test_browse_metadata_rejects_nonzero_index() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(
        &cds,
        "Browse",
        &[
            ("ObjectID", "100"),
            ("BrowseFlag", "BrowseMetadata"),
            ("Filter", "*"),
            ("StartingIndex", "3"),
            ("RequestedCount", "0"),
            ("SortCriteria", ""),
        ],
    );
    assert_eq!(outcome.error.unwrap().0, 720);
}

#[test]
fn test_browse_invalid_flag() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(
        &cds,
        "Browse",
        &[
            ("ObjectID", "100"),
            ("BrowseFlag", "BrowseEverything"),
            ("Filter", "*"),
        ],
    );
    assert_eq!(outcome.error.unwrap().0, 720);
}

#[test]
fn test_browse_unknown_object() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(
        &cds,
        "Browse",
        &[
            ("ObjectID", "9999"),
            ("BrowseFlag", "BrowseDirectChildren"),
            ("Filter", "*"),
        ],
    );
    assert_eq!(outcome.error.unwrap().0, 701);
}

#[test]
fn test_browse_missing_args() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(&cds, "Browse", &[("ObjectID", "100")]);
    assert_eq!(outcome.error.unwrap().0, 402);
}

#[test]
fn test_get_system_update_id_padded_and_monotonic() {
    let vfs = two_file_vfs();
    let cds = CdsService::new(vfs.clone());

    let first = invoke(&cds, "GetSystemUpdateID", &[]);
    let id_text = first.response("Id").to_string();
    assert_eq!(id_text.len(), 10);
    let first_value: u32 = id_text.parse().unwrap();

    vfs.lock().add_container("More", 0, 0);
    let second = invoke(&cds, "GetSystemUpdateID", &[]);
    let second_value: u32 = second.response("Id").parse().unwrap();
    assert!(second_value > first_value);
}

#[test]
fn test_sort_capabilities() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(&cds, "GetSortCapabilities", &[]);
    assert_eq!(outcome.response("SortCaps"), "dc:title");
}

#[test]
fn test_search_capabilities_default_empty() {
    let cds = CdsService::new(two_file_vfs());
    let outcome = invoke(&cds, "GetSearchCapabilities", &[]);
    assert_eq!(outcome.response("SearchCaps"), "");
}

#[test]
fn test_search_falls_back_to_root() {
    let cds = CdsService::new(two_file_vfs());
    // Container inconnu : recherche depuis la racine
    let outcome = invoke(
        &cds,
        "Search",
        &[
            ("ContainerID", "31337"),
            ("SearchCriteria", "(upnp:class derivedfrom \"object.item.audioItem\")"),
            ("Filter", "*"),
            ("StartingIndex", "0"),
            ("RequestedCount", "0"),
            ("SortCriteria", ""),
        ],
    );
    assert!(outcome.error.is_none());
    assert_eq!(outcome.response("TotalMatches"), "0000000002");
}

#[test]
fn test_feature_list_document() {
    let vfs = two_file_vfs();
    let mut cds = CdsService::new(vfs);
    cds.add_feature("samsung.com_BASICVIEW");

    let outcome = invoke(&cds, "GetFeatureList", &[]);
    let features = outcome.response("FeatureList");
    assert!(features.contains("<Features"));
    assert!(features.contains("urn:schemas-upnp-org:av:avs"));
    assert!(features.contains("name=\"samsung.com_BASICVIEW\""));
    assert!(features.contains("version=\"1\""));
}

#[test]
fn test_vfs_changed_stamps_eventing() {
    let cds = CdsService::new(two_file_vfs());
    let variable = cds.definition().find_variable("SystemUpdateID").unwrap();
    assert_eq!(variable.eventing(), 0);
    cds.vfs_changed();
    assert_eq!(variable.eventing(), 1);
}
