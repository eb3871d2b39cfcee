use serde_derive::{Deserialize, Serialize};

/// One RGB triple in the 8-bit-per-channel range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Colour(pub u8, pub u8, pub u8);

impl Colour {
    /// Build a colour from untrusted integers, clamping each channel
    /// in to `0..=255`.
    pub fn from_clamped(r: i64, g: i64, b: i64) -> Self {
        Colour(
            r.clamp(0, 255) as u8,
            g.clamp(0, 255) as u8,
            b.clamp(0, 255) as u8,
        )
    }
}

/// Opaque identifier the lighting service uses for one addressable LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LedId(pub u32);

/// One LED with its target colour. Immutable once constructed, the full
/// set for a device is rebuilt rather than edited.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LedColour {
    pub id: LedId,
    pub colour: Colour,
}

impl LedColour {
    pub fn new(id: LedId, colour: Colour) -> Self {
        Self { id, colour }
    }
}
