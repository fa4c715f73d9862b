//! Regex scalar codec.
//!
//! The pattern travels as a JSON string; the options string travels in the
//! schema. Neither may contain a NUL byte (a caller precondition).

use serde_json::Value as Json;
use sjson_types::Regex;

use crate::error::Error;
use crate::schema::SchemaElem;
use crate::string;

pub(crate) fn encode(value: &Regex) -> Vec<u8> {
    string::encode(&value.pattern)
}

pub(crate) fn decode(json: &Json, elem: &SchemaElem) -> Result<Regex, Error> {
    if json.is_null() {
        panic!("null data");
    }
    let options = elem
        .options
        .clone()
        .ok_or(Error::MissingSchema("regex options"))?;
    let pattern = json
        .as_str()
        .ok_or_else(|| Error::bad("regex", "expected a pattern JSON string"))?;
    Ok(Regex {
        pattern: pattern.to_string(),
        options,
    })
}
