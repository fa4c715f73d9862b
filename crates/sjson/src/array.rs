//! Array composite codec.
//!
//! Symmetric to the document codec but keyed by position: the schema holds
//! one descriptor per element, in order.

use serde_json::Value as Json;
use sjson_types::Array;

use crate::error::Error;
use crate::schema::SchemaElem;
use crate::{decode_value, encode_value, Limits};

pub(crate) fn encode(arr: &Array) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(b'[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        buf.extend_from_slice(&encode_value(value));
    }
    buf.push(b']');
    buf
}

pub(crate) fn decode(
    json: &Json,
    items: &[SchemaElem],
    depth: usize,
    limits: &Limits,
) -> Result<Array, Error> {
    let elements = json
        .as_array()
        .ok_or_else(|| Error::bad("array", "expected a JSON array"))?;

    if items.len() != elements.len() {
        return Err(Error::ItemCountMismatch {
            schema_items: items.len(),
            data_elements: elements.len(),
        });
    }

    let mut arr = Array::with_capacity(items.len());
    for (element, item) in elements.iter().zip(items) {
        arr.push(decode_value(element, Some(item), depth, limits)?);
    }
    Ok(arr)
}
