//! The seam between the effect pipeline and the vendor lighting service.
//!
//! Everything above this crate speaks [`LightingLink`]; the service itself
//! owns device discovery and the wire protocol. [`SimLink`] is the in-tree
//! backend so the full pipeline runs and tests without hardware, the real
//! SDK binding is behind the `cuesdk` feature.

mod link;
pub use link::*;

mod sim;
pub use sim::*;

#[cfg(feature = "cuesdk")]
pub mod cue;

pub mod error;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");
