use std::collections::BTreeMap;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::{Colour, LedColour, LedId};

/// The three operator-supplied colour triples. Replacing the palette
/// replaces every LED assignment on the next table build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Palette([Colour; 3]);

impl Palette {
    pub fn new(triples: [Colour; 3]) -> Self {
        Self(triples)
    }

    /// Exactly nine integers make a palette, anything else is rejected.
    pub fn from_ints(ints: &[i64]) -> Option<Self> {
        if ints.len() != 9 {
            return None;
        }
        Some(Self([
            Colour::from_clamped(ints[0], ints[1], ints[2]),
            Colour::from_clamped(ints[3], ints[4], ints[5]),
            Colour::from_clamped(ints[6], ints[7], ints[8]),
        ]))
    }

    /// Map positional command-line tokens on to the nine palette slots.
    /// Missing or non-numeric tokens become zero, extras are ignored.
    pub fn from_args(args: &[String]) -> Self {
        let mut ints = [0i64; 9];
        for (slot, arg) in ints.iter_mut().zip(args.iter()) {
            *slot = arg.parse().unwrap_or(0);
        }
        Self([
            Colour::from_clamped(ints[0], ints[1], ints[2]),
            Colour::from_clamped(ints[3], ints[4], ints[5]),
            Colour::from_clamped(ints[6], ints[7], ints[8]),
        ])
    }

    /// Which triple a LED at `index` in hardware enumeration order gets.
    ///
    /// The even check runs before the multiple-of-three check, so indices
    /// divisible by both (0, 6, 12, ...) always take the first triple and
    /// the second triple only ever lands on odd multiples of three. Kept
    /// bit-for-bit with the shipped effect.
    pub fn colour_for_position(&self, index: usize) -> Colour {
        if index % 2 == 0 {
            self.0[0]
        } else if index % 3 == 0 {
            self.0[1]
        } else {
            self.0[2]
        }
    }

    pub fn triples(&self) -> &[Colour; 3] {
        &self.0
    }
}

impl FromStr for Palette {
    type Err = Error;

    /// Parses the console token format: comma-separated integers, reading
    /// fields until the first one that is not a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ints: Vec<i64> = s
            .split(',')
            .map_while(|field| field.trim().parse().ok())
            .collect();
        Self::from_ints(&ints).ok_or(Error::ParsePalette)
    }
}

/// The shared mapping from device index to its ordered LED assignments.
///
/// Entry order within a device follows the hardware-reported enumeration
/// order and is replayed verbatim to the buffered-update call. The table
/// is only ever swapped out whole, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KeyTable(BTreeMap<usize, Vec<LedColour>>);

impl KeyTable {
    /// Assign a palette triple to every LED of every device.
    ///
    /// `topology[d]` is the ordered LED list reported for device index `d`.
    /// The builder is pure so it can run against synthetic device sets.
    pub fn build(topology: &[Vec<LedId>], palette: &Palette) -> Self {
        let mut table = BTreeMap::new();
        for (device, leds) in topology.iter().enumerate() {
            let assignments = leds
                .iter()
                .enumerate()
                .map(|(i, id)| LedColour::new(*id, palette.colour_for_position(i)))
                .collect();
            table.insert(device, assignments);
        }
        Self(table)
    }

    pub fn devices(&self) -> impl Iterator<Item = (usize, &[LedColour])> {
        self.0.iter().map(|(device, leds)| (*device, leds.as_slice()))
    }

    pub fn device(&self, index: usize) -> Option<&[LedColour]> {
        self.0.get(&index).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
