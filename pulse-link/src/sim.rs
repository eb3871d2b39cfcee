use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use log::debug;
use pulse_rgb::{LedColour, LedId};

use crate::error::{LinkError, Result};
use crate::{FlushDone, LightingLink};

/// A virtual device set standing in for the lighting service.
///
/// Every staged batch and every flush is recorded so tests can assert on
/// exactly what a driver submitted, in order.
pub struct SimLink {
    devices: Vec<Vec<LedId>>,
    online: bool,
    frames: Mutex<Vec<(usize, Vec<LedColour>)>>,
    flushes: AtomicUsize,
}

impl SimLink {
    /// One virtual device per entry, with that many LEDs. LED identifiers
    /// encode device and position so batches are traceable.
    pub fn new(led_counts: &[usize]) -> Self {
        let devices = led_counts
            .iter()
            .enumerate()
            .map(|(device, count)| {
                (0..*count)
                    .map(|i| LedId(((device as u32) << 8) | i as u32))
                    .collect()
            })
            .collect();
        Self {
            devices,
            online: true,
            frames: Mutex::new(Vec::new()),
            flushes: AtomicUsize::new(0),
        }
    }

    /// A typical desk set, one full-size keyboard and one mouse.
    pub fn desk_set() -> Self {
        Self::new(&[108, 16])
    }

    /// A link whose service is not running; the handshake fails.
    pub fn offline() -> Self {
        let mut link = Self::new(&[]);
        link.online = false;
        link
    }

    /// All staged batches in submission order.
    pub fn frames(&self) -> Vec<(usize, Vec<LedColour>)> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl LightingLink for SimLink {
    fn handshake(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(LinkError::ServerNotFound)
        }
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn led_positions(&self, device: usize) -> Result<Vec<LedId>> {
        self.devices
            .get(device)
            .cloned()
            .ok_or(LinkError::NoDevice(device))
    }

    fn set_leds_buffer(&self, device: usize, leds: &[LedColour]) -> Result<()> {
        if device >= self.devices.len() {
            return Err(LinkError::NoDevice(device));
        }
        if let Ok(mut frames) = self.frames.lock() {
            frames.push((device, leds.to_vec()));
        }
        Ok(())
    }

    fn flush_async(&self, done: Option<FlushDone>) -> Result<()> {
        let count = self.flushes.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("sim flush {}", count);
        if let Some(done) = done {
            done(Ok(()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pulse_rgb::{Colour, KeyTable, Palette, RED};

    use super::*;

    #[test]
    fn offline_handshake_reports_server_not_found() {
        let link = SimLink::offline();
        assert_eq!(link.handshake(), Err(LinkError::ServerNotFound));
        assert_eq!(link.device_count(), 0);
    }

    #[test]
    fn topology_reports_every_device_in_order() {
        let link = SimLink::new(&[3, 2]);
        link.handshake().unwrap();
        let topology = link.topology().unwrap();
        assert_eq!(topology.len(), 2);
        assert_eq!(topology[0], vec![LedId(0), LedId(1), LedId(2)]);
        assert_eq!(topology[1], vec![LedId(0x100), LedId(0x101)]);
    }

    #[test]
    fn staged_batches_are_recorded_in_submission_order() {
        let link = SimLink::new(&[2, 2]);
        let table = KeyTable::build(&link.topology().unwrap(), &Palette::new([RED, RED, RED]));

        for (device, leds) in table.devices() {
            link.set_leds_buffer(device, leds).unwrap();
        }
        link.flush_async(None).unwrap();

        let frames = link.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].0, 0);
        assert_eq!(frames[1].0, 1);
        assert_eq!(frames[0].1[1].colour, Colour(255, 0, 0));
        assert_eq!(link.flushes(), 1);
    }

    #[test]
    fn unknown_device_index_is_rejected() {
        let link = SimLink::new(&[1]);
        assert_eq!(link.led_positions(4), Err(LinkError::NoDevice(4)));
        assert_eq!(link.set_leds_buffer(4, &[]), Err(LinkError::NoDevice(4)));
    }

    #[test]
    fn flush_completion_hook_is_invoked() {
        let link = SimLink::new(&[1]);
        let (tx, rx) = std::sync::mpsc::channel();
        link.flush_async(Some(Box::new(move |result| {
            tx.send(result.is_ok()).unwrap();
        })))
        .unwrap();
        assert!(rx.recv().unwrap());
    }
}
