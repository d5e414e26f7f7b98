//! Digital Media Renderer de référence.
//!
//! ```text
//! dlna-dmr [-i <interface>] [-d|-u]
//! ```

use std::io::BufRead;
use std::sync::Arc;

use dlnaapp::init_logging;
use dlnacontrol::{Capabilities, Dlna, DlnaConfig};
use dlnamediarenderer::new_dmr;
use dlnaprofiler::ProfilerRegistry;
use dlnaupnp::NullAdapter;

fn usage(name: &str) {
    println!("Usage: {name} [-u|d] [-i interface]");
    println!("Options:");
    println!(" -i\tNetwork interface");
    println!(" -d\tStart in strict DLNA compliant mode");
    println!(" -h\tDisplay help");
    println!(" -u\tStart in pervasive UPnP A/V compliant mode");
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    let mut interface: Option<String> = None;
    let mut capabilities = Capabilities::default();

    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "-i" | "--interface" => {
                index += 1;
                interface = args.get(index).cloned();
            }
            "-d" | "--dlna" => capabilities.dlna = true,
            "-u" | "--upnp" => capabilities.upnp_av = true,
            _ => {
                usage(&args[0]);
                return 255;
            }
        }
        index += 1;
    }

    let config = DlnaConfig {
        interface: interface.unwrap_or_else(|| "lo".to_string()),
        capabilities,
        friendly_name: "dlna-dmr".to_string(),
        ..DlnaConfig::default()
    }
    .normalized();
    init_logging(config.verbosity);

    let mut registry = ProfilerRegistry::new();
    registry.set_check_extensions(config.check_extensions);
    let registry = Arc::new(registry);

    let mut dlna = Dlna::new(config.clone(), Arc::new(NullAdapter::new()));

    let (mut device, _avts) = new_dmr(registry, config.device_mode());
    device.set_friendly_name(&config.friendly_name);
    device.set_uuid(&config.device_uuid());
    device.set_manufacturer("dlna");
    device.set_model_name("dlna-dmr");
    dlna.set_device(Arc::new(device));

    if let Err(e) = dlna.start() {
        eprintln!("DMR init went wrong: {e}");
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
