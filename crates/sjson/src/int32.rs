//! Int32 scalar codec.

use serde_json::Value as Json;

use crate::error::Error;

pub(crate) fn encode(value: i32) -> Vec<u8> {
    value.to_string().into_bytes()
}

pub(crate) fn decode(json: &Json) -> Result<i32, Error> {
    if json.is_null() {
        panic!("null data");
    }
    let n = json
        .as_i64()
        .ok_or_else(|| Error::bad("int", "expected a JSON integer"))?;
    i32::try_from(n).map_err(|_| Error::bad("int", format!("{n} does not fit in 32 bits")))
}
