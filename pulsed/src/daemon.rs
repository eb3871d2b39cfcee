use std::io::{Read, Write};
use std::process::exit;
use std::sync::{Arc, Mutex};
use std::thread;

use gumdrop::Options;
use log::{error, info, warn};
#[cfg(feature = "cuesdk")]
use pulse_link::cue::CueLink;
#[cfg(not(feature = "cuesdk"))]
use pulse_link::SimLink;
use pulse_link::LightingLink;
use pulse_rgb::{KeyTable, Palette};
use pulsed::cli_opts::CliStart;
use pulsed::error::PulseError;
use pulsed::input;
use pulsed::pulse::PulseDriver;

fn main() -> Result<(), PulseError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match CliStart::parse_args_default(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("Error: {}", err);
            return Ok(());
        }
    };

    if parsed.help {
        println!("{}", CliStart::usage());
        return Ok(());
    }
    if parsed.version {
        println!("pulsed v{}", pulsed::VERSION);
        return Ok(());
    }

    let mut logger = env_logger::Builder::new();
    logger
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();

    info!("    pulsed v{}", pulsed::VERSION);
    info!(" pulse-rgb v{}", pulse_rgb::VERSION);
    info!("pulse-link v{}", pulse_link::VERSION);

    start_daemon(Arc::new(build_link()), Palette::from_args(&parsed.colours))
}

#[cfg(not(feature = "cuesdk"))]
fn build_link() -> SimLink {
    info!("cuesdk feature disabled, driving the simulated lighting link");
    SimLink::desk_set()
}

#[cfg(feature = "cuesdk")]
fn build_link() -> CueLink {
    CueLink::new()
}

/// Handshake, build the initial table, then run the frame loop on this
/// thread with the input listener on a second one. Never returns unless
/// startup fails.
fn start_daemon<L>(link: Arc<L>, palette: Palette) -> Result<(), PulseError>
where
    L: LightingLink + 'static,
{
    if let Err(err) = link.handshake() {
        println!("Handshake failed: {}\nPress any key to quit.", err);
        let _ = std::io::stdin().read(&mut [0u8; 1]);
        exit(-1);
    }

    let table = KeyTable::build(&link.topology()?, &palette);
    if table.is_empty() {
        error!("{}", PulseError::NoDevices);
        exit(1);
    }
    info!("driving {} lighting device(s)", table.len());

    let shared = Arc::new(Mutex::new(table));

    let _listener = {
        let link = link.clone();
        let shared = shared.clone();
        thread::Builder::new()
            .name("input-listener".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                if let Err(err) = input::listen(stdin.lock(), link.as_ref(), &shared) {
                    warn!("input listener stopped: {}", err);
                }
            })?
    };

    PulseDriver::default().run_forever(link.as_ref(), &shared)
}
