//! DateTime scalar codec.
//!
//! Encodes as milliseconds since the Unix epoch, a signed 64-bit JSON
//! number (negative before the epoch).

use serde_json::Value as Json;
use sjson_types::DateTime;

use crate::error::Error;

pub(crate) fn encode(value: &DateTime) -> Vec<u8> {
    value.millis().to_string().into_bytes()
}

pub(crate) fn decode(json: &Json) -> Result<DateTime, Error> {
    if json.is_null() {
        panic!("null data");
    }
    let ms = json
        .as_i64()
        .ok_or_else(|| Error::bad("date", "expected a millisecond JSON integer"))?;
    Ok(DateTime::from_millis(ms))
}
