use std::{error, fmt};

pub type Result<T> = std::result::Result<T, LinkError>;

/// The lighting-service protocol error codes, plus the out-of-range device
/// index the simulator can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    ServerNotFound,
    NoControl,
    HandshakeMissing,
    IncompatibleProtocol,
    InvalidArguments,
    NoDevice(usize),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::ServerNotFound => write!(f, "Lighting service not running"),
            LinkError::NoControl => write!(f, "Lighting control not granted"),
            LinkError::HandshakeMissing => write!(f, "Protocol handshake has not been performed"),
            LinkError::IncompatibleProtocol => write!(f, "Service protocol is incompatible"),
            LinkError::InvalidArguments => write!(f, "Invalid arguments passed to the service"),
            LinkError::NoDevice(index) => write!(f, "No device at index {}", index),
        }
    }
}

impl error::Error for LinkError {}
