use std::{error, fmt};

#[derive(Debug, PartialEq)]
pub enum Error {
    ParsePalette,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParsePalette => write!(f, "Could not parse nine palette integers"),
        }
    }
}

impl error::Error for Error {}
