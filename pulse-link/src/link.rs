use pulse_rgb::{LedColour, LedId};

use crate::error::Result;

/// Invoked when an asynchronous flush completes. The daemon never registers
/// one, it exists for callers that want flush observability.
pub type FlushDone = Box<dyn FnOnce(Result<()>) + Send>;

/// One connection to the vendor lighting service.
///
/// The service owns device discovery; this trait only replays what it
/// reports. Device indices are dense and stable for the lifetime of the
/// connection, LED order within a device is the hardware enumeration order.
pub trait LightingLink: Send + Sync {
    /// Protocol handshake. Must succeed before anything else is called.
    fn handshake(&self) -> Result<()>;

    /// Number of currently connected lighting-capable devices.
    fn device_count(&self) -> usize;

    /// Ordered LED identifiers for one device.
    fn led_positions(&self, device: usize) -> Result<Vec<LedId>>;

    /// Stage one device's colours in to the service-side frame buffer.
    /// Nothing reaches the hardware until a flush.
    fn set_leds_buffer(&self, device: usize, leds: &[LedColour]) -> Result<()>;

    /// Fire-and-forget flush of all buffered updates. `done` is called once
    /// the flush is dispatched; pass `None` to not observe completion.
    fn flush_async(&self, done: Option<FlushDone>) -> Result<()>;

    /// LED lists for all devices, indexed by device.
    fn topology(&self) -> Result<Vec<Vec<LedId>>> {
        (0..self.device_count())
            .map(|device| self.led_positions(device))
            .collect()
    }
}
