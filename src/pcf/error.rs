//! pcf::error
//!
//! The only failure a caller ever sees from a decode: a buffer too short
//! to hold the fixed header. Everything else (bad parameter lengths,
//! unknown command codes, unparseable timestamps) degrades in place.

use std::{error::Error as StdError, fmt};

use crate::pcf::header::HeaderError;

// -----------------------------------------------------------------------------
// ----- DecodeError -----------------------------------------------------------

#[derive(Debug)]
pub enum DecodeError {
    Header(HeaderError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Header(e) => write!(f, "PCF header: {e}"),
        }
    }
}

impl StdError for DecodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            DecodeError::Header(e) => Some(e),
        }
    }
}

impl From<HeaderError> for DecodeError {
    fn from(e: HeaderError) -> Self {
        DecodeError::Header(e)
    }
}
