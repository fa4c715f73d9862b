//! ObjectId scalar codec.
//!
//! The 12-byte identifier is rendered as a 24-character lowercase hex JSON
//! string. Decode verifies the exact byte length after hex-decoding.

use serde_json::Value as Json;
use sjson_types::ObjectId;

use crate::error::Error;

const HEX: &[u8; 16] = b"0123456789abcdef";

pub(crate) fn encode(value: &ObjectId) -> Vec<u8> {
    let mut out = Vec::with_capacity(26);
    out.push(b'"');
    for byte in value.as_bytes() {
        out.push(HEX[usize::from(byte >> 4)]);
        out.push(HEX[usize::from(byte & 0x0f)]);
    }
    out.push(b'"');
    out
}

pub(crate) fn decode(json: &Json) -> Result<ObjectId, Error> {
    if json.is_null() {
        panic!("null data");
    }
    let hex = json
        .as_str()
        .ok_or_else(|| Error::bad("objectId", "expected a hex JSON string"))?;
    let bytes = decode_hex(hex)?;
    if bytes.len() != 12 {
        return Err(Error::BadLength {
            target: "objectId",
            expected: 12,
            actual: bytes.len(),
        });
    }
    let mut id = [0u8; 12];
    id.copy_from_slice(&bytes);
    Ok(ObjectId(id))
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, Error> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(Error::bad("objectId", "odd-length hex string"));
    }
    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for pair in raw.chunks_exact(2) {
        match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(hi), Some(lo)) => bytes.push(hi << 4 | lo),
            _ => return Err(Error::bad("objectId", format!("invalid hex in {hex:?}"))),
        }
    }
    Ok(bytes)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
