use std::fmt;

use pulse_link::error::LinkError;

#[derive(Debug)]
pub enum PulseError {
    NoDevices,
    Link(LinkError),
    Io(std::io::Error),
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseError::NoDevices => write!(f, "No lighting devices detected"),
            PulseError::Link(err) => write!(f, "Lighting service: {}", err),
            PulseError::Io(err) => write!(f, "IO Error: {}", err),
        }
    }
}

impl std::error::Error for PulseError {}

impl From<LinkError> for PulseError {
    fn from(err: LinkError) -> Self {
        Self::Link(err)
    }
}

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
