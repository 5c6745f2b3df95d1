//! Module: pcf::header
//!
//! Fixed 36-byte PCF message header. All nine fields are signed 32-bit
//! integers at fixed offsets, little-endian like every other integer on
//! this wire.

use bytes::{BufMut, Bytes, BytesMut};
use std::{error::Error as StdError, fmt};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

pub const PCF_HEADER_LEN: usize = 36;

// -----------------------------------------------------------------------------
// ----- PcfHeader -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcfHeader {
    pub struc_type: i32,
    pub struc_length: i32,
    pub version: i32,
    pub command: i32,
    pub msg_seq_number: i32,
    pub control: i32,
    pub comp_code: i32,
    pub reason: i32,
    pub parameter_count: i32,
}

// -----------------------------------------------------------------------------
// ----- Error -----------------------------------------------------------------

#[derive(Debug)]
pub enum HeaderError {
    Truncated { have: usize },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::Truncated { have } => {
                write!(f, "buffer too short for PCF header: {have} of {PCF_HEADER_LEN} bytes")
            }
        }
    }
}

impl StdError for HeaderError {}

// -----------------------------------------------------------------------------
// ----- Helpers ---------------------------------------------------------------

#[inline]
fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

// -----------------------------------------------------------------------------
// ----- PcfHeader: Public Methods ---------------------------------------------

impl PcfHeader {
    /// Decode the header from the front of `data`. No field validation
    /// happens here; unknown command codes are handled downstream.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < PCF_HEADER_LEN {
            return Err(HeaderError::Truncated { have: data.len() });
        }

        Ok(Self {
            struc_type: read_i32(data, 0),
            struc_length: read_i32(data, 4),
            version: read_i32(data, 8),
            command: read_i32(data, 12),
            msg_seq_number: read_i32(data, 16),
            control: read_i32(data, 20),
            comp_code: read_i32(data, 24),
            reason: read_i32(data, 28),
            parameter_count: read_i32(data, 32),
        })
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(PCF_HEADER_LEN);

        buf.put_i32_le(self.struc_type);
        buf.put_i32_le(self.struc_length);
        buf.put_i32_le(self.version);
        buf.put_i32_le(self.command);
        buf.put_i32_le(self.msg_seq_number);
        buf.put_i32_le(self.control);
        buf.put_i32_le(self.comp_code);
        buf.put_i32_le(self.reason);
        buf.put_i32_le(self.parameter_count);

        buf.freeze()
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
