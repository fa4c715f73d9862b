//! String scalar codec.

use serde_json::Value as Json;

use crate::error::Error;

pub(crate) fn encode(value: &str) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|_| b"\"\"".to_vec())
}

pub(crate) fn decode(json: &Json) -> Result<String, Error> {
    match json {
        Json::Null => panic!("null data"),
        Json::String(s) => Ok(s.clone()),
        _ => Err(Error::bad("string", "expected a JSON string")),
    }
}
