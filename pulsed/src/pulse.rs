use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use log::debug;
use pulse_link::LightingLink;
use pulse_rgb::KeyTable;

/// Cadence of the effect, one submit-and-flush cycle per interval.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(25);

/// Continuously replays the shared key table to the lighting service.
///
/// The table lock is held only across the per-device buffer submissions,
/// never across the flush or the sleep. Submission and flush failures are
/// fire-and-forget, the service gives no completion signal worth waiting on.
pub struct PulseDriver {
    interval: Duration,
}

impl Default for PulseDriver {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl PulseDriver {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Submit one frame: every device's assignments, then one async flush.
    pub fn frame<L: LightingLink>(&self, link: &L, shared: &Mutex<KeyTable>) {
        if let Ok(table) = shared.lock() {
            for (device, leds) in table.devices() {
                if let Err(err) = link.set_leds_buffer(device, leds) {
                    debug!("buffered update failed for device {}: {}", device, err);
                }
            }
        }
        if let Err(err) = link.flush_async(None) {
            debug!("flush dispatch failed: {}", err);
        }
    }

    /// Drive frames until `running` is cleared. The flag is the explicit
    /// stand-in for a shutdown path the effect otherwise does not have.
    pub fn run<L: LightingLink>(&self, link: &L, shared: &Mutex<KeyTable>, running: &AtomicBool) {
        while running.load(Ordering::Relaxed) {
            self.frame(link, shared);
            thread::sleep(self.interval);
        }
    }

    /// The production loop: runs for the remaining lifetime of the process.
    pub fn run_forever<L: LightingLink>(&self, link: &L, shared: &Mutex<KeyTable>) -> ! {
        let running = AtomicBool::new(true);
        loop {
            self.run(link, shared, &running);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pulse_link::SimLink;
    use pulse_rgb::{Palette, BLACK, BLUE, RED};

    use super::*;

    #[test]
    fn one_frame_submits_every_device_then_flushes() {
        let link = SimLink::new(&[3, 2]);
        let shared = Mutex::new(KeyTable::build(
            &link.topology().unwrap(),
            &Palette::default(),
        ));

        let driver = PulseDriver::new(Duration::ZERO);
        driver.frame(&link, &shared);
        driver.frame(&link, &shared);

        let frames = link.frames();
        assert_eq!(frames.len(), 4);
        // Device order within each frame, repeated per frame.
        assert_eq!(frames[0].0, 0);
        assert_eq!(frames[1].0, 1);
        assert_eq!(frames[2].0, 0);
        assert_eq!(frames[3].0, 1);
        assert_eq!(frames[0].1.len(), 3);
        assert_eq!(frames[1].1.len(), 2);
        assert_eq!(link.flushes(), 2);
    }

    #[test]
    fn run_stops_when_the_flag_clears() {
        let link = Arc::new(SimLink::new(&[2]));
        let shared = Arc::new(Mutex::new(KeyTable::build(
            &link.topology().unwrap(),
            &Palette::default(),
        )));
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let link = link.clone();
            let shared = shared.clone();
            let running = running.clone();
            thread::spawn(move || {
                PulseDriver::new(Duration::ZERO).run(&*link, &shared, &running);
            })
        };

        while link.flushes() < 3 {
            thread::yield_now();
        }
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        assert!(link.flushes() >= 3);
    }

    /// A submitted batch must never mix LED colours from two different
    /// table generations. Each generation here is a uniform colour, so a
    /// torn batch would show two colours at once.
    #[test]
    fn concurrent_swaps_never_tear_a_batch() {
        let link = Arc::new(SimLink::new(&[24, 8]));
        let topology = link.topology().unwrap();
        let shared = Arc::new(Mutex::new(KeyTable::build(&topology, &Palette::default())));
        let running = Arc::new(AtomicBool::new(true));

        let driver = {
            let link = link.clone();
            let shared = shared.clone();
            let running = running.clone();
            thread::spawn(move || {
                PulseDriver::new(Duration::ZERO).run(&*link, &shared, &running);
            })
        };

        // Let the driver land at least one frame before racing it.
        while link.flushes() == 0 {
            thread::yield_now();
        }

        let generations = [
            Palette::new([RED, RED, RED]),
            Palette::new([BLUE, BLUE, BLUE]),
        ];
        for i in 0..200 {
            let table = KeyTable::build(&topology, &generations[i % 2]);
            if let Ok(mut guard) = shared.lock() {
                *guard = table;
            }
        }

        running.store(false, Ordering::Relaxed);
        driver.join().unwrap();

        let frames = link.frames();
        assert!(!frames.is_empty());
        for (device, leds) in frames {
            let first = leds[0].colour;
            assert!(
                first == BLACK || first == RED || first == BLUE,
                "unexpected colour in batch"
            );
            assert!(
                leds.iter().all(|led| led.colour == first),
                "device {} batch mixed two table generations",
                device
            );
        }
    }
}
