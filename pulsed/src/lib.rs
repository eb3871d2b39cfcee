#![deny(unused_must_use)]
/// Command-line options
pub mod cli_opts;
/// Console palette input and the listener thread
pub mod input;
/// The fixed-cadence frame submission loop
pub mod pulse;

pub mod error;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");
