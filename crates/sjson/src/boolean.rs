//! Bool scalar codec.

use serde_json::Value as Json;

use crate::error::Error;

pub(crate) fn encode(value: bool) -> Vec<u8> {
    if value {
        b"true".to_vec()
    } else {
        b"false".to_vec()
    }
}

pub(crate) fn decode(json: &Json) -> Result<bool, Error> {
    if json.is_null() {
        panic!("null data");
    }
    json.as_bool()
        .ok_or_else(|| Error::bad("bool", "expected a JSON boolean"))
}
