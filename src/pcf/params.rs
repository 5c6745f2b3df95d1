//! Module: pcf::params
//!
//! Decoder for the self-describing parameter stream that follows the PCF
//! header: a sequence of (tag, type, length) sub-headers with payloads,
//! each padded out to a 4-byte boundary.
//!
//! This is a best-effort decoder. Malformed trailing data — a declared
//! length outside [12, 65536], or one that overruns the buffer — stops
//! the scan and keeps everything decoded so far; upstream messages get
//! truncated by queue-manager size limits and losing the tail of one
//! message must not lose the rest of it.

use tracing::{debug, warn};

use crate::pcf::constants::cft_name;
use crate::pcf::value::{self, Value};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

/// Size of the (tag, type, length) sub-header, included in the declared length.
pub const PARAM_HEADER_LEN: usize = 12;

/// Upper bound on a single declared parameter length.
pub const MAX_PARAM_LEN: usize = 65536;

// -----------------------------------------------------------------------------
// ----- PcfParameter ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PcfParameter {
    /// Numeric tag selecting the semantic meaning (e.g. queue name).
    pub parameter: i32,
    /// Type tag selecting the payload encoding.
    pub kind: i32,
    /// Declared byte length, inclusive of the 12-byte sub-header.
    pub length: i32,
    pub value: Value,
}

// -----------------------------------------------------------------------------
// ----- Helpers ---------------------------------------------------------------

#[inline]
fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

// -----------------------------------------------------------------------------
// ----- Decoding --------------------------------------------------------------

/// Decode the parameter stream in `data` (the bytes after the header).
///
/// The header's declared parameter count is advisory and deliberately not
/// consulted: the byte stream's own boundaries are authoritative.
pub fn decode_parameters(data: &[u8]) -> Vec<PcfParameter> {
    let mut parameters = Vec::new();
    let mut cursor = 0usize;

    while cursor < data.len() {
        if data.len() - cursor < PARAM_HEADER_LEN {
            debug!(
                remaining = data.len() - cursor,
                "not enough bytes for a parameter sub-header"
            );
            break;
        }

        let parameter = read_i32(data, cursor);
        let kind = read_i32(data, cursor + 4);
        let length = read_i32(data, cursor + 8);

        if length < PARAM_HEADER_LEN as i32 || length > MAX_PARAM_LEN as i32 {
            warn!(
                parameter,
                kind = cft_name(kind),
                length,
                offset = cursor,
                "invalid parameter length, discarding remainder of message"
            );
            break;
        }

        let length = length as usize;
        if cursor + length > data.len() {
            warn!(
                parameter,
                length,
                offset = cursor,
                buffer_len = data.len(),
                "parameter extends past end of buffer, discarding remainder of message"
            );
            break;
        }

        let payload = &data[cursor + PARAM_HEADER_LEN..cursor + length];
        parameters.push(PcfParameter {
            parameter,
            kind,
            length: length as i32,
            value: value::decode(kind, payload),
        });

        cursor += length;
        if cursor % 4 != 0 {
            cursor += 4 - cursor % 4;
        }
    }

    parameters
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcf::constants::{MQCFT_INTEGER, MQCFT_STRING, MQIA_CURRENT_Q_DEPTH, MQCA_Q_NAME};
    use bytes::{BufMut, BytesMut};

    fn int_param(parameter: i32, v: i32) -> BytesMut {
        let mut buf = BytesMut::with_capacity(16);
        buf.put_i32_le(parameter);
        buf.put_i32_le(MQCFT_INTEGER);
        buf.put_i32_le(16);
        buf.put_i32_le(v);
        buf
    }

    /// String parameter with the declared length exactly covering the text;
    /// the buffer is padded to the next 4-byte boundary like a real writer.
    fn str_param(parameter: i32, text: &str) -> BytesMut {
        let declared = PARAM_HEADER_LEN + text.len();
        let mut buf = BytesMut::new();
        buf.put_i32_le(parameter);
        buf.put_i32_le(MQCFT_STRING);
        buf.put_i32_le(declared as i32);
        buf.extend_from_slice(text.as_bytes());
        while buf.len() % 4 != 0 {
            buf.put_u8(0);
        }
        buf
    }

    #[test]
    fn decodes_consecutive_parameters() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&int_param(MQIA_CURRENT_Q_DEPTH, 42));
        buf.extend_from_slice(&str_param(MQCA_Q_NAME, "Q1"));
        buf.extend_from_slice(&int_param(99, -7));

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 3);
        assert_eq!(params[0].value, Value::Int(42));
        assert_eq!(params[1].value, Value::Text("Q1".into()));
        assert_eq!(params[2].value, Value::Int(-7));
    }

    #[test]
    fn unaligned_length_advances_to_next_boundary() {
        // "ABCDE" → declared length 17, padded extent 20, so the next
        // parameter must still decode cleanly.
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&str_param(MQCA_Q_NAME, "ABCDE"));
        buf.extend_from_slice(&int_param(MQIA_CURRENT_Q_DEPTH, 5));

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].length, 17);
        assert_eq!(params[0].value, Value::Text("ABCDE".into()));
        assert_eq!(params[1].value, Value::Int(5));
    }

    #[test]
    fn empty_stream_yields_no_parameters() {
        assert!(decode_parameters(&[]).is_empty());
    }

    #[test]
    fn trailing_bytes_shorter_than_a_subheader_are_ignored() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&int_param(1, 1));
        buf.extend_from_slice(&[0xAA; 7]);

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 1);
    }

    #[test]
    fn undersized_declared_length_stops_but_keeps_prior_parameters() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&int_param(1, 10));
        buf.extend_from_slice(&int_param(2, 20));
        // declared length 8 < 12
        buf.put_i32_le(3);
        buf.put_i32_le(MQCFT_INTEGER);
        buf.put_i32_le(8);
        buf.put_i32_le(30);
        buf.extend_from_slice(&int_param(4, 40)); // never reached

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].value, Value::Int(10));
        assert_eq!(params[1].value, Value::Int(20));
    }

    #[test]
    fn oversized_declared_length_stops_the_scan() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&int_param(1, 10));
        buf.put_i32_le(2);
        buf.put_i32_le(MQCFT_INTEGER);
        buf.put_i32_le(65537);
        buf.put_i32_le(0);

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 1);
    }

    #[test]
    fn length_overrunning_the_buffer_stops_the_scan() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&int_param(1, 10));
        buf.put_i32_le(2);
        buf.put_i32_le(MQCFT_INTEGER);
        buf.put_i32_le(64); // claims 64 bytes, only 16 present
        buf.put_i32_le(0);

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, Value::Int(10));
    }

    #[test]
    fn parameters_never_overlap() {
        let mut buf = BytesMut::new();
        for i in 0..8 {
            buf.extend_from_slice(&str_param(1000 + i, &"X".repeat(1 + i as usize)));
        }

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 8);
        for (i, p) in params.iter().enumerate() {
            assert_eq!(p.parameter, 1000 + i as i32);
            assert_eq!(p.value, Value::Text("X".repeat(1 + i)));
        }
    }

    #[test]
    fn unknown_type_is_emitted_with_absent_value() {
        let mut buf = BytesMut::new();
        buf.put_i32_le(77);
        buf.put_i32_le(0x05); // integer-list, not modeled
        buf.put_i32_le(20);
        buf.extend_from_slice(&[0u8; 8]);
        buf.extend_from_slice(&int_param(78, 9));

        let params = decode_parameters(&buf);

        assert_eq!(params.len(), 2);
        assert!(params[0].value.is_absent());
        assert_eq!(params[1].value, Value::Int(9));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
