//! Identifie le profil DLNA d'un fichier et affiche ses attributs.
//!
//! ```text
//! dlna-profiler <fichier>
//! ```

use dlnaprofiler::{MediaClass, ProfilerRegistry};
use dlnavfs::dlna_org_other;

fn class_name(class: MediaClass) -> &'static str {
    match class {
        MediaClass::Image => "image",
        MediaClass::Audio => "audio",
        MediaClass::Av => "audio/video",
        MediaClass::Collection => "collection",
        MediaClass::Radio => "radio",
        MediaClass::Tv => "tv",
        MediaClass::Folder => "folder",
        MediaClass::Album => "album",
        MediaClass::Unknown => "unknown",
    }
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    let Some(filename) = args.get(1) else {
        eprintln!("Usage: {} <file>", args[0]);
        return 255;
    };

    let registry = ProfilerRegistry::new();
    let item = match registry.create_item(filename) {
        Ok(item) => item,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return 1;
        }
    };

    let profile = item.profile();
    println!("File: {filename}");
    println!("Profile id: {}", if profile.id().is_empty() { "-" } else { profile.id() });
    println!("MIME: {}", profile.mime());
    println!("Class: {}", class_name(profile.media_class()));
    println!("Size: {} byte(s)", item.filesize());

    if let Some(properties) = &item.properties {
        println!("Properties:");
        if !properties.duration.is_empty() {
            println!("  duration: {}", properties.duration);
        }
        if properties.bitrate > 0 {
            println!("  bitrate: {}", properties.bitrate);
        }
        if properties.sample_frequency > 0 {
            println!("  sample frequency: {}", properties.sample_frequency);
        }
        if properties.bits_per_sample > 0 {
            println!("  bits per sample: {}", properties.bits_per_sample);
        }
        if properties.channels > 0 {
            println!("  channels: {}", properties.channels);
        }
        if !properties.resolution.is_empty() {
            println!("  resolution: {}", properties.resolution);
        }
    }

    if let Some(metadata) = &item.metadata {
        println!("Metadata:");
        let fields = [
            ("title", &metadata.title),
            ("author", &metadata.author),
            ("album", &metadata.album),
            ("genre", &metadata.genre),
            ("comment", &metadata.comment),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                println!("  {name}: {value}");
            }
        }
        if let Some(track) = metadata.track {
            println!("  track: {track}");
        }
    }

    let other = if profile.id().is_empty() {
        "*".to_string()
    } else {
        dlna_org_other(profile.id())
    };
    println!("protocolInfo: http-get:*:{}:{}", profile.mime(), other);
    0
}
