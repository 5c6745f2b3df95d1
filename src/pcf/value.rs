//! Module: pcf::value
//!
//! Decoded parameter payloads. A parameter carries exactly one of a
//! 32-bit integer, a NUL-padded text field, or an opaque byte blob;
//! every other type tag maps to `Value::Absent` so the parameter still
//! shows up in the raw map without a decoded payload.

use memchr::memchr;
use serde::Serialize;

use crate::pcf::constants::{MQCFT_BYTE_STRING, MQCFT_INTEGER, MQCFT_STRING};

// -----------------------------------------------------------------------------
// ----- Value -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i32),
    Text(String),
    Bytes(Vec<u8>),
    Absent,
}

// -----------------------------------------------------------------------------
// ----- Value: Public Methods -------------------------------------------------

impl Value {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

// -----------------------------------------------------------------------------
// ----- Decoding --------------------------------------------------------------

/// Decode a parameter payload (the bytes after the 12-byte sub-header)
/// according to its type tag. Never fails: payloads that are too short
/// for their declared type, and type tags the decoder does not model,
/// yield `Value::Absent`.
pub fn decode(kind: i32, payload: &[u8]) -> Value {
    match kind {
        MQCFT_INTEGER if payload.len() >= 4 => {
            Value::Int(i32::from_le_bytes(payload[..4].try_into().unwrap()))
        }
        MQCFT_STRING if !payload.is_empty() => Value::Text(read_mq_string(payload)),
        MQCFT_BYTE_STRING if !payload.is_empty() => Value::Bytes(payload.to_vec()),
        _ => Value::Absent,
    }
}

/// Fixed-width MQ text fields are NUL-padded: keep only the bytes before
/// the first NUL. No whitespace trimming — surrounding spaces are data.
fn read_mq_string(payload: &[u8]) -> String {
    let end = memchr(0, payload).unwrap_or(payload.len());

    String::from_utf8_lossy(&payload[..end]).into_owned()
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
