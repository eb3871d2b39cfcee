mod colour;
pub use colour::*;

mod table;
pub use table::*;

pub mod error;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

pub const BLACK: Colour = Colour(0x00, 0x00, 0x00);
pub const RED: Colour = Colour(0xff, 0x00, 0x00);
pub const GREEN: Colour = Colour(0x00, 0xff, 0x00);
pub const BLUE: Colour = Colour(0x00, 0x00, 0xff);
