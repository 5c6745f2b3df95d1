//! Fixture builders for PCF message buffers. Everything is little-endian,
//! matching the decoder.

use bytes::{BufMut, BytesMut};
use std::fs;
use std::path::Path;

use mqcrab::pcf::PcfHeader;
use mqcrab::pcf::constants::{MQCFT_INTEGER, MQCFT_STATISTICS, MQCFT_STRING};

#[allow(dead_code)]
pub fn message(command: i32, params: &[BytesMut]) -> BytesMut {
    let header = PcfHeader {
        struc_type: MQCFT_STATISTICS,
        struc_length: 36,
        version: 3,
        command,
        msg_seq_number: 1,
        control: 1,
        comp_code: 0,
        reason: 0,
        parameter_count: params.len() as i32,
    };

    let mut buf = BytesMut::from(&header.to_bytes()[..]);
    for param in params {
        buf.extend_from_slice(param);
    }
    buf
}

#[allow(dead_code)]
pub fn int_param(parameter: i32, value: i32) -> BytesMut {
    let mut buf = BytesMut::with_capacity(16);
    buf.put_i32_le(parameter);
    buf.put_i32_le(MQCFT_INTEGER);
    buf.put_i32_le(16);
    buf.put_i32_le(value);
    buf
}

/// NUL-padded out to the next 4-byte boundary, declared length covering
/// the padding like a real queue manager writes it.
#[allow(dead_code)]
pub fn str_param(parameter: i32, text: &str) -> BytesMut {
    let padded = (12 + text.len()).div_ceil(4) * 4;
    let mut buf = BytesMut::with_capacity(padded);
    buf.put_i32_le(parameter);
    buf.put_i32_le(MQCFT_STRING);
    buf.put_i32_le(padded as i32);
    buf.extend_from_slice(text.as_bytes());
    while buf.len() < padded {
        buf.put_u8(0);
    }
    buf
}

/// Write a message as a commented hex dump, the format `ReplaySource`
/// and `pcfdump` consume.
#[allow(dead_code)]
pub fn write_hex_dump(path: &Path, data: &[u8]) {
    let mut out = String::from("# captured admin message\n");
    for chunk in data.chunks(16) {
        out.push_str(&hex::encode(chunk));
        out.push('\n');
    }
    fs::write(path, out).expect("write hex dump");
}
