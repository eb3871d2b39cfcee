use std::io::BufRead;
use std::sync::Mutex;

use log::{debug, info, warn};
use pulse_link::LightingLink;
use pulse_rgb::{KeyTable, Palette};

use crate::error::PulseError;

/// One whitespace-delimited console token. Tokens of two characters or
/// fewer are discarded outright; longer tokens must carry exactly nine
/// comma-separated integers to produce a palette.
fn parse_token(token: &str) -> Option<Palette> {
    if token.len() <= 2 {
        return None;
    }
    token.parse().ok()
}

/// Consume palette updates from a text stream until it ends.
///
/// Each valid token rebuilds the key table against the current device
/// topology and swaps the whole table in to `shared` under its lock.
/// Malformed tokens are dropped and listening continues; end-of-stream
/// ends the listener and leaves the frame loop running on whatever table
/// was last swapped in.
pub fn listen<R, L>(reader: R, link: &L, shared: &Mutex<KeyTable>) -> Result<(), PulseError>
where
    R: BufRead,
    L: LightingLink,
{
    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let palette = match parse_token(token) {
                Some(palette) => palette,
                None => {
                    debug!("discarding console token: {}", token);
                    continue;
                }
            };
            match link.topology() {
                Ok(topology) => {
                    let table = KeyTable::build(&topology, &palette);
                    if let Ok(mut guard) = shared.lock() {
                        *guard = table;
                    }
                    info!("palette updated from console input");
                }
                Err(err) => warn!("palette update dropped, topology query failed: {}", err),
            }
        }
    }
    Ok(())
}
