//! Int64 ("long") scalar codec.
//!
//! A value whose magnitude exceeds 2^53 cannot survive a JSON backend whose
//! number type is an IEEE double, so it is string-encoded; everything else
//! stays a bare JSON number. Decode accepts both forms.

use serde_json::Value as Json;

use crate::error::Error;

/// Largest magnitude an IEEE double represents exactly at integer
/// granularity.
const MAX_SAFE_INTEGER: i64 = 1 << 53;

pub(crate) fn encode(value: i64) -> Vec<u8> {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        value.to_string().into_bytes()
    } else {
        let mut out = Vec::with_capacity(22);
        out.push(b'"');
        out.extend_from_slice(value.to_string().as_bytes());
        out.push(b'"');
        out
    }
}

pub(crate) fn decode(json: &Json) -> Result<i64, Error> {
    match json {
        Json::Null => panic!("null data"),
        Json::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::bad("long", "number is not a 64-bit integer")),
        Json::String(s) => s
            .parse::<i64>()
            .map_err(|_| Error::bad("long", format!("invalid integer literal {s:?}"))),
        _ => Err(Error::bad("long", "expected a JSON integer or string")),
    }
}
