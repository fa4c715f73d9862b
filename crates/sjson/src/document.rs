//! Document composite codec.
//!
//! A nested document's data is a plain JSON object; its key order and field
//! types live in the enclosing schema tree.

use serde_json::Value as Json;
use sjson_types::Document;

use crate::error::Error;
use crate::schema::Schema;
use crate::{decode_value, encode_value, string, Limits};

/// Encodes the document's own fields, keys in their existing order.
pub(crate) fn encode(doc: &Document) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(b'{');
    for (i, (key, value)) in doc.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        buf.extend_from_slice(&string::encode(key));
        buf.push(b':');
        buf.extend_from_slice(&encode_value(value));
    }
    buf.push(b'}');
    buf
}

/// Decodes a JSON object against its schema, rebuilding the document in
/// schema key order.
pub(crate) fn decode(
    json: &Json,
    schema: &Schema,
    depth: usize,
    limits: &Limits,
) -> Result<Document, Error> {
    let obj = json
        .as_object()
        .ok_or_else(|| Error::bad("object", "expected a JSON object"))?;

    if schema.keys.len() != obj.len() {
        return Err(Error::KeyCountMismatch {
            schema_keys: schema.keys.len(),
            data_fields: obj.len(),
        });
    }

    let mut doc = Document::with_capacity(schema.keys.len());
    for key in &schema.keys {
        let field = obj.get(key).ok_or_else(|| Error::MissingKey(key.clone()))?;
        let value = decode_value(field, schema.properties.get(key), depth, limits)?;
        doc.insert(key.clone(), value);
    }
    Ok(doc)
}
