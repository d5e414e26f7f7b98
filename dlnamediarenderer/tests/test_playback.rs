//! Tests d'intégration du moteur de lecture AVTransport.
//!
//! Un profiler maquette fournit des profils « jouables » dont les trames
//! sont cadencées artificiellement, ce qui permet d'exercer la machine
//! d'états complète sans décodeur réel.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dlnaprofiler::{
    FrameStatus, MediaClass, MediaItem, MediaProfile, Profiler, ProfilerCookie,
    ProfilerRegistry, Properties,
};
use dlnastream::{DlnaStream, StreamError};
use dlnaupnp::{ActionEvent, UpnpService, soap_request};
use dlnamediarenderer::{AvtsService, TransportState};

/// Profil maquette : chaque piste dure `frames` trames de `frame_ms`.
struct MockProfile {
    frames: u32,
    frame_ms: u64,
}

impl MediaProfile for MockProfile {
    fn id(&self) -> &str {
        "MOCK"
    }
    fn mime(&self) -> &str {
        "audio/mpeg"
    }
    fn media_class(&self) -> MediaClass {
        MediaClass::Audio
    }
    fn playable(&self) -> bool {
        true
    }

    fn get_properties(&self, _item: &MediaItem) -> Option<Properties> {
        Some(Properties {
            duration: "00:03:20.".to_string(),
            bitrate: 128_000,
            sample_frequency: 44_100,
            bits_per_sample: 16,
            samples_per_frame: 1152,
            channels: 2,
            resolution: String::new(),
        })
    }

    fn prepare_stream(&self, item: &mut MediaItem) -> Result<(), StreamError> {
        // la position de piste vit dans le cookie de l'item
        item.cookie = Some(Box::new(0u32));
        Ok(())
    }

    fn read_frame(&self, item: &mut MediaItem) -> FrameStatus {
        std::thread::sleep(Duration::from_millis(self.frame_ms));
        let Some(cookie) = item.cookie.as_mut().and_then(|c| c.downcast_mut::<u32>()) else {
            return FrameStatus::Finished;
        };
        *cookie += 1;
        if *cookie < self.frames {
            FrameStatus::Running
        } else if *cookie == self.frames {
            FrameStatus::Finishing
        } else {
            FrameStatus::Finished
        }
    }

    fn close_stream(&self, item: &mut MediaItem) {
        item.cookie = None;
    }
}

struct MockProfiler {
    frames: u32,
    frame_ms: u64,
}

impl Profiler for MockProfiler {
    fn supported_mime_types(&self) -> Vec<&'static str> {
        vec!["audio/mpeg"]
    }

    fn guess_media_profile(
        &self,
        _stream: &mut DlnaStream,
    ) -> Option<(Arc<dyn MediaProfile>, Option<ProfilerCookie>)> {
        Some((
            Arc::new(MockProfile { frames: self.frames, frame_ms: self.frame_ms }),
            None,
        ))
    }

    fn get_media_profile(&self, _profile_id: &str) -> Option<Arc<dyn MediaProfile>> {
        None
    }
}

struct Fixture {
    avts: AvtsService,
    _dir: tempfile::TempDir,
    uris: Vec<String>,
}

/// Monte un service AVTS et `track_count` fichiers mp3 factices.
fn fixture(track_count: usize, frames: u32, frame_ms: u64) -> Fixture {
    let mut registry = ProfilerRegistry::new();
    registry.add_profiler(Arc::new(MockProfiler { frames, frame_ms }));
    let avts = AvtsService::new(Arc::new(registry));

    let dir = tempfile::tempdir().unwrap();
    let mut uris = Vec::new();
    for index in 0..track_count {
        let path = dir.path().join(format!("track{index}.mp3"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"mock audio payload").unwrap();
        uris.push(path.to_str().unwrap().to_string());
    }

    Fixture { avts, _dir: dir, uris }
}

fn invoke(avts: &AvtsService, action: &str, args: &[(&str, &str)]) -> Option<(u32, String)> {
    let request = soap_request(action, args);
    let mut ev = ActionEvent::new(&request);
    avts.invoke(action, &mut ev);
    let (_, error) = ev.into_parts();
    error
}

fn responses_of(avts: &AvtsService, action: &str, args: &[(&str, &str)]) -> Vec<(String, String)> {
    let request = soap_request(action, args);
    let mut ev = ActionEvent::new(&request);
    avts.invoke(action, &mut ev);
    let (responses, error) = ev.into_parts();
    assert!(error.is_none(), "{action} failed: {error:?}");
    responses
}

fn response<'a>(responses: &'a [(String, String)], name: &str) -> &'a str {
    responses
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("missing {name}"))
}

fn wait_for_state(avts: &AvtsService, id: u32, wanted: TransportState, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    loop {
        let state = avts.instance(id).map(|instance| instance.state());
        if state == Some(wanted) {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "instance #{id} did not reach {wanted:?} (currently {state:?})"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_set_uri_then_play() {
    // NO_MEDIA → STOPPED → PLAYING sur l'instance 0
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;
    let uri = &fixture.uris[0];

    assert_eq!(avts.instance(0).unwrap().state(), TransportState::NoMedia);

    let error = invoke(avts, "SetAVTransportURI", &[("InstanceID", "0"), ("CurrentURI", uri)]);
    assert!(error.is_none());
    assert_eq!(avts.instance(0).unwrap().state(), TransportState::Stopped);

    let error = invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);
    assert!(error.is_none());
    wait_for_state(avts, 0, TransportState::Playing, Duration::from_secs(2));

    let last_change = avts.last_change();
    assert!(last_change.contains("TransportState val=\"PLAYING\"")
        || last_change.contains("TransportState") && last_change.contains("PLAYING"));
    assert!(last_change.contains("NumberOfTracks"));
    assert!(last_change.contains("CurrentTrack val=\"1\""));
    assert!(last_change.contains(uri.as_str()));

    avts.shutdown();
}

#[test]
fn test_play_speed_rejected() {
    // Play à une vitesse autre que 1 est refusé en 717
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;
    let uri = &fixture.uris[0];

    invoke(avts, "SetAVTransportURI", &[("InstanceID", "0"), ("CurrentURI", uri)]);
    let error = invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "2")]);
    assert_eq!(error.unwrap().0, 717);

    avts.shutdown();
}

#[test]
fn test_play_from_no_media_rejected() {
    let fixture = fixture(0, 1000, 10);
    let avts = &fixture.avts;

    let error = invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);
    assert_eq!(error.unwrap().0, 701);

    avts.shutdown();
}

#[test]
fn test_unknown_instance_rejected() {
    let fixture = fixture(0, 1000, 10);
    let avts = &fixture.avts;

    let error = invoke(avts, "Play", &[("InstanceID", "5"), ("Speed", "1")]);
    assert_eq!(error.unwrap().0, 718);

    avts.shutdown();
}

#[test]
fn test_pause_from_stopped_rejected() {
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;
    let uri = &fixture.uris[0];

    invoke(avts, "SetAVTransportURI", &[("InstanceID", "0"), ("CurrentURI", uri)]);
    let error = invoke(avts, "Pause", &[("InstanceID", "0")]);
    assert_eq!(error.unwrap().0, 701);

    avts.shutdown();
}

#[test]
fn test_bad_uri_rejected_with_714() {
    let fixture = fixture(0, 1000, 10);
    let avts = &fixture.avts;

    let error = invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", "/does/not/exist.mp3")],
    );
    assert_eq!(error.unwrap().0, 714);

    avts.shutdown();
}

#[test]
fn test_next_off_the_end_stops() {
    // Next avec une seule piste : TRANSITIONING puis STOPPED
    let fixture = fixture(1, 1000, 150);
    let avts = &fixture.avts;
    let uri = &fixture.uris[0];

    invoke(avts, "SetAVTransportURI", &[("InstanceID", "0"), ("CurrentURI", uri)]);
    invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);
    wait_for_state(avts, 0, TransportState::Playing, Duration::from_secs(2));

    let error = invoke(avts, "Next", &[("InstanceID", "0")]);
    assert!(error.is_none());
    // La transition est posée de façon synchrone par le handler ; le
    // thread de lecture peut déjà l'avoir complétée en STOPPED
    let observed = avts.instance(0).unwrap().state();
    assert!(
        matches!(observed, TransportState::Transitioning | TransportState::Stopped),
        "unexpected state after Next: {observed:?}"
    );

    // Pas de piste suivante : la transition aboutit en STOPPED
    wait_for_state(avts, 0, TransportState::Stopped, Duration::from_secs(2));

    avts.shutdown();
}

#[test]
fn test_next_advances_to_second_track() {
    let fixture = fixture(2, 1000, 30);
    let avts = &fixture.avts;

    invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", &fixture.uris[0])],
    );
    invoke(
        avts,
        "SetNextAVTransportURI",
        &[("InstanceID", "0"), ("NextURI", &fixture.uris[1])],
    );
    invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);
    wait_for_state(avts, 0, TransportState::Playing, Duration::from_secs(2));

    invoke(avts, "Next", &[("InstanceID", "0")]);
    // La transition aboutit sur la deuxième piste, lecture reprise
    wait_for_state(avts, 0, TransportState::Playing, Duration::from_secs(2));

    let responses = responses_of(avts, "GetPositionInfo", &[("InstanceID", "0")]);
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut track = response(&responses, "Track").to_string();
    while track != "2" && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
        let responses = responses_of(avts, "GetPositionInfo", &[("InstanceID", "0")]);
        track = response(&responses, "Track").to_string();
    }
    assert_eq!(track, "2");

    avts.shutdown();
}

#[test]
fn test_track_end_chains_naturally() {
    // Piste de 3 trames : fin propre → TRANSITIONING → piste suivante
    let fixture = fixture(2, 3, 20);
    let avts = &fixture.avts;

    invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", &fixture.uris[0])],
    );
    invoke(
        avts,
        "SetNextAVTransportURI",
        &[("InstanceID", "0"), ("NextURI", &fixture.uris[1])],
    );
    invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);

    // La première piste s'épuise, la seconde démarre, puis tout s'arrête
    wait_for_state(avts, 0, TransportState::Stopped, Duration::from_secs(5));

    avts.shutdown();
}

#[test]
fn test_position_info_reports_counter() {
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;

    invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", &fixture.uris[0])],
    );
    invoke(avts, "Play", &[("InstanceID", "0"), ("Speed", "1")]);
    wait_for_state(avts, 0, TransportState::Playing, Duration::from_secs(2));
    std::thread::sleep(Duration::from_millis(100));

    let responses = responses_of(avts, "GetPositionInfo", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "Track"), "1");
    assert_eq!(response(&responses, "TrackDuration"), "00:03:20.");
    assert_eq!(response(&responses, "AbsTime"), "NOT_IMPLEMENTED");
    // Débit connu : la position relative est dérivée du compteur
    assert_ne!(response(&responses, "RelTime"), "NOT_IMPLEMENTED");
    let rel_count: u32 = response(&responses, "RelCount").parse().unwrap();
    assert!(rel_count > 0);
    assert_eq!(response(&responses, "RelCount"), response(&responses, "AbsCount"));

    avts.shutdown();
}

#[test]
fn test_get_transport_info_and_actions() {
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;

    let responses = responses_of(avts, "GetTransportInfo", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "CurrentTransportState"), "NO_MEDIA_PRESENT");
    assert_eq!(response(&responses, "CurrentTransportStatus"), "OK");
    assert_eq!(response(&responses, "CurrentSpeed"), "1");

    let responses = responses_of(avts, "GetCurrentTransportActions", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "Actions"), "NONE");

    invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", &fixture.uris[0])],
    );
    let responses = responses_of(avts, "GetCurrentTransportActions", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "Actions"), "PLAY");

    avts.shutdown();
}

#[test]
fn test_stop_destroys_non_zero_instance() {
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;

    let instance = avts.create_instance(1);
    {
        let mut guard = instance.shared.lock();
        guard.state = TransportState::Stopped;
    }

    let error = invoke(avts, "Stop", &[("InstanceID", "1")]);
    assert!(error.is_none());
    assert!(avts.instance(1).is_none(), "instance 1 must be destroyed");
    assert!(avts.instance(0).is_some());

    avts.shutdown();
}

#[test]
fn test_record_not_implemented() {
    let fixture = fixture(0, 1000, 10);
    let avts = &fixture.avts;

    let error = invoke(avts, "Record", &[("InstanceID", "0")]);
    assert_eq!(error.unwrap().0, 501);
    let error = invoke(avts, "SetPlayMode", &[("InstanceID", "0"), ("NewPlayMode", "NORMAL")]);
    assert_eq!(error.unwrap().0, 501);

    avts.shutdown();
}

#[test]
fn test_seek_track_nr_retargets_next() {
    let fixture = fixture(3, 1000, 10);
    let avts = &fixture.avts;

    for (index, uri) in fixture.uris.iter().enumerate() {
        let action = if index == 0 { "SetAVTransportURI" } else { "SetNextAVTransportURI" };
        let arg = if index == 0 { "CurrentURI" } else { "NextURI" };
        invoke(avts, action, &[("InstanceID", "0"), (arg, uri)]);
    }

    // Unité supportée
    let error = invoke(
        avts,
        "Seek",
        &[("InstanceID", "0"), ("Unit", "TRACK_NR"), ("Target", "2")],
    );
    assert!(error.is_none());

    // Unité non supportée → 710
    let error = invoke(
        avts,
        "Seek",
        &[("InstanceID", "0"), ("Unit", "REL_TIME"), ("Target", "00:01:00")],
    );
    assert_eq!(error.unwrap().0, 710);

    avts.shutdown();
}

#[test]
fn test_media_info_lists_tracks() {
    let fixture = fixture(2, 1000, 10);
    let avts = &fixture.avts;

    invoke(
        avts,
        "SetAVTransportURI",
        &[("InstanceID", "0"), ("CurrentURI", &fixture.uris[0])],
    );
    invoke(
        avts,
        "SetNextAVTransportURI",
        &[("InstanceID", "0"), ("NextURI", &fixture.uris[1])],
    );

    let responses = responses_of(avts, "GetMediaInfo", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "NrTracks"), "2");
    assert_eq!(response(&responses, "CurrentURI"), fixture.uris[0]);
    assert_eq!(response(&responses, "NextURI"), fixture.uris[1]);
    assert_eq!(response(&responses, "PlayMedium"), "NETWORK");

    let responses = responses_of(avts, "GetMediaInfo_Ext", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "CurrentType"), "TRACK_AWARE");

    avts.shutdown();
}

#[test]
fn test_duplicate_uri_is_noop() {
    let fixture = fixture(1, 1000, 10);
    let avts = &fixture.avts;
    let uri = &fixture.uris[0];

    invoke(avts, "SetAVTransportURI", &[("InstanceID", "0"), ("CurrentURI", uri)]);
    invoke(avts, "SetNextAVTransportURI", &[("InstanceID", "0"), ("NextURI", uri)]);

    let responses = responses_of(avts, "GetMediaInfo", &[("InstanceID", "0")]);
    assert_eq!(response(&responses, "NrTracks"), "1");

    avts.shutdown();
}
