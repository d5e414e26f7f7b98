//! Digital Media Server de référence.
//!
//! ```text
//! dlna-dms -c <répertoire> [-i <interface>] [-d|-u|-x]
//! ```
//!
//! Partage le répertoire donné, puis attend `q` + Entrée pour s'arrêter
//! proprement. Sort avec le code 255 sur une erreur de configuration.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use dlnaapp::{init_logging, scan};
use dlnacontrol::{Capabilities, Dlna, DlnaConfig};
use dlnamediaserver::new_dms;
use dlnaprofiler::ProfilerRegistry;
use dlnaupnp::NullAdapter;
use dlnavfs::{DlnaProtocol, HttpProtocol, Vfs, export_didl, shared};

fn usage(name: &str) {
    println!("Usage: {name} [-u|d|x] [-c directory] [-i interface]");
    println!("Options:");
    println!(" -c\tContent directory to be shared");
    println!(" -i\tNetwork interface");
    println!(" -d\tStart in strict DLNA compliant mode");
    println!(" -h\tDisplay help");
    println!(" -u\tStart in pervasive UPnP A/V compliant mode");
    println!(" -x\tStart in hackish XboX 360 UPnP A/V compliant mode");
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    let mut content_dir: Option<String> = None;
    let mut interface: Option<String> = None;
    let mut capabilities = Capabilities::default();

    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "-c" | "--content" => {
                index += 1;
                content_dir = args.get(index).cloned();
            }
            "-i" | "--interface" => {
                index += 1;
                interface = args.get(index).cloned();
            }
            "-d" | "--dlna" => capabilities.dlna = true,
            "-u" | "--upnp" => capabilities.upnp_av = true,
            "-x" | "--xbox" => capabilities.xbox = true,
            _ => {
                usage(&args[0]);
                return 255;
            }
        }
        index += 1;
    }

    let Some(content_dir) = content_dir else {
        eprintln!("No content directory to be shared, bail out.");
        return 255;
    };
    if !Path::new(&content_dir).is_dir() {
        eprintln!("Invalid content directory");
        return 255;
    }

    let config = DlnaConfig {
        interface: interface.unwrap_or_else(|| "lo".to_string()),
        capabilities,
        friendly_name: "dlna-dms".to_string(),
        ..DlnaConfig::default()
    }
    .normalized();
    init_logging(config.verbosity);

    // Profilers : le repli par extensions est intégré au registre
    let mut registry = ProfilerRegistry::new();
    registry.set_check_extensions(config.check_extensions);
    let registry = Arc::new(registry);

    let mut dlna = Dlna::new(config.clone(), Arc::new(NullAdapter::new()));

    // VFS + transport HTTP
    let vfs = shared(Vfs::new(config.vfs_mode()));
    let http = Arc::new(HttpProtocol::new(dlna.location()));
    vfs.lock().add_protocol(http.clone());
    http.init(vfs.clone(), dlna.web());
    export_didl(vfs.clone(), dlna.web());

    // Device MediaServer
    let (mut device, cds) = new_dms(vfs.clone(), config.device_mode());
    device.set_friendly_name(&config.friendly_name);
    device.set_uuid(&config.device_uuid());
    device.set_manufacturer("dlna");
    device.set_model_name("dlna-dms");
    dlna.set_device(Arc::new(device));

    println!("Trying to share '{content_dir}'");
    let added = scan::add_dir(&registry, &vfs, Path::new(&content_dir), 0);
    cds.vfs_changed();
    println!("{added} resource(s) shared");

    if let Err(e) = dlna.start() {
        eprintln!("DMS init went wrong: {e}");
        return 255;
    }

    println!("Hit 'q' or 'Q' + Enter to shutdown");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
    }

    if let Err(e) = dlna.stop() {
        eprintln!("shutdown error: {e}");
        return 1;
    }
    0
}
