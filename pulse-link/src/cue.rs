//! Bindings for the vendor CUE SDK, enabled with the `cuesdk` feature.
//! Requires the native SDK library at link time.

use std::os::raw::{c_char, c_double, c_int, c_void};

use pulse_rgb::{LedColour, LedId};

use crate::error::{LinkError, Result};
use crate::{FlushDone, LightingLink};

#[allow(dead_code)]
#[repr(C)]
struct CorsairProtocolDetails {
    sdk_version: *const c_char,
    server_version: *const c_char,
    sdk_protocol_version: c_int,
    server_protocol_version: c_int,
    breaking_changes: bool,
}

#[repr(C)]
struct CorsairLedColor {
    led_id: c_int,
    r: c_int,
    g: c_int,
    b: c_int,
}

#[allow(dead_code)]
#[repr(C)]
struct CorsairLedPosition {
    led_id: c_int,
    top: c_double,
    left: c_double,
    height: c_double,
    width: c_double,
}

#[repr(C)]
struct CorsairLedPositions {
    number_of_led: c_int,
    p_led_position: *mut CorsairLedPosition,
}

#[link(name = "CUESDK")]
extern "C" {
    fn CorsairPerformProtocolHandshake() -> CorsairProtocolDetails;
    fn CorsairGetLastError() -> c_int;
    fn CorsairGetDeviceCount() -> c_int;
    fn CorsairGetLedPositionsByDeviceIndex(device_index: c_int) -> *mut CorsairLedPositions;
    fn CorsairSetLedsColorsBufferByDeviceIndex(
        device_index: c_int,
        size: c_int,
        led_colors: *mut CorsairLedColor,
    ) -> bool;
    fn CorsairSetLedsColorsFlushBufferAsync(
        callback: Option<unsafe extern "C" fn(*mut c_void, bool, c_int)>,
        context: *mut c_void,
    ) -> bool;
}

fn last_error() -> Option<LinkError> {
    match unsafe { CorsairGetLastError() } {
        0 => None,
        1 => Some(LinkError::ServerNotFound),
        2 => Some(LinkError::NoControl),
        3 => Some(LinkError::HandshakeMissing),
        4 => Some(LinkError::IncompatibleProtocol),
        _ => Some(LinkError::InvalidArguments),
    }
}

/// Connection to a running iCUE service via the native SDK.
#[derive(Default)]
pub struct CueLink;

impl CueLink {
    pub fn new() -> Self {
        Self
    }
}

impl LightingLink for CueLink {
    fn handshake(&self) -> Result<()> {
        unsafe { CorsairPerformProtocolHandshake() };
        match last_error() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn device_count(&self) -> usize {
        let count = unsafe { CorsairGetDeviceCount() };
        count.max(0) as usize
    }

    fn led_positions(&self, device: usize) -> Result<Vec<LedId>> {
        let positions = unsafe { CorsairGetLedPositionsByDeviceIndex(device as c_int) };
        if positions.is_null() {
            return Err(last_error().unwrap_or(LinkError::NoDevice(device)));
        }
        let positions = unsafe { &*positions };
        let leds = unsafe {
            std::slice::from_raw_parts(
                positions.p_led_position,
                positions.number_of_led.max(0) as usize,
            )
        };
        Ok(leds.iter().map(|led| LedId(led.led_id as u32)).collect())
    }

    fn set_leds_buffer(&self, device: usize, leds: &[LedColour]) -> Result<()> {
        let mut colors: Vec<CorsairLedColor> = leds
            .iter()
            .map(|led| CorsairLedColor {
                led_id: led.id.0 as c_int,
                r: led.colour.0 as c_int,
                g: led.colour.1 as c_int,
                b: led.colour.2 as c_int,
            })
            .collect();
        let ok = unsafe {
            CorsairSetLedsColorsBufferByDeviceIndex(
                device as c_int,
                colors.len() as c_int,
                colors.as_mut_ptr(),
            )
        };
        if ok {
            Ok(())
        } else {
            Err(last_error().unwrap_or(LinkError::InvalidArguments))
        }
    }

    /// The native completion callback is not registered; when a `done` hook
    /// is supplied it is called with the dispatch result instead.
    fn flush_async(&self, done: Option<FlushDone>) -> Result<()> {
        let ok = unsafe { CorsairSetLedsColorsFlushBufferAsync(None, std::ptr::null_mut()) };
        let result = if ok {
            Ok(())
        } else {
            Err(last_error().unwrap_or(LinkError::InvalidArguments))
        };
        if let Some(done) = done {
            done(result.clone());
        }
        result
    }
}
