//! Schema-tracked JSON codec for the document value model.
//!
//! The codec converts [`sjson_types::Value`] trees to and from a textual
//! JSON encoding while preserving exact type identity across types JSON
//! cannot natively distinguish (integer widths, binary blobs, regexes,
//! timestamps). A side-channel schema, derived bottom-up from the value at
//! encode time, disambiguates the JSON literals at decode time; the schema
//! is authoritative, and JSON shape alone is never used to infer a type.
//!
//! The envelope stores the schema under the reserved `$s` key, with the
//! document's own fields as siblings:
//!
//! ```json
//! {
//!   "$s": {
//!     "$k": ["field1", "field2"],
//!     "p": {"field1": {"t": "..."}, "field2": {"t": "..."}}
//!   },
//!   "field1": <json representation>,
//!   "field2": <json representation>
//! }
//! ```
//!
//! # Mapping
//!
//! | Value       | Schema element                  | JSON representation |
//! |-------------|---------------------------------|---------------------|
//! | `Document`  | `{"t":"object","$s":{...}}`     | JSON object |
//! | `Array`     | `{"t":"array","i":[...]}`       | JSON array |
//! | `Double`    | `{"t":"double"}`                | JSON number; `"-0"`, `"Infinity"`, `"-Infinity"`, `"NaN"` as strings |
//! | `String`    | `{"t":"string"}`                | JSON string |
//! | `Binary`    | `{"t":"binData","s":<subtype>}` | base64 JSON string |
//! | `ObjectId`  | `{"t":"objectId"}`              | 24-character lowercase hex JSON string |
//! | `Bool`      | `{"t":"bool"}`                  | JSON true / false |
//! | `DateTime`  | `{"t":"date"}`                  | milliseconds since epoch as JSON number |
//! | `Null`      | `{"t":"null"}`                  | JSON null |
//! | `Regex`     | `{"t":"regex","o":<options>}`   | pattern as JSON string |
//! | `Int32`     | `{"t":"int"}`                   | JSON number |
//! | `Timestamp` | `{"t":"timestamp"}`             | JSON number |
//! | `Int64`     | `{"t":"long"}`                  | JSON number, string-wrapped beyond ±2^53 |
//!
//! Decoding is two-pass: the input is first parsed into a generic JSON tree
//! (separating the schema field from the data fields), and only then is
//! each data field reinterpreted by its descriptor. The codec holds no
//! state across calls and is safe for unbounded concurrent use.

mod array;
mod binary;
mod boolean;
mod datetime;
mod document;
mod double;
mod error;
mod int32;
mod int64;
mod object_id;
mod regex;
mod schema;
mod string;
mod timestamp;

pub use error::Error;
pub use schema::{ElemType, Schema, SchemaElem};

use serde_json::Value as Json;
use sjson_types::{Document, Value};

/// Reserved envelope key holding the document schema.
pub const SCHEMA_KEY: &str = "$s";

/// Decode-side resource bounds.
///
/// The wire layer owns the authoritative document-size ceiling; the codec
/// takes its bounds as a parameter rather than hard-coding them.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum document/array nesting depth.
    pub max_depth: usize,
    /// Maximum envelope size in bytes.
    pub max_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 100,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Parses exactly one JSON value, rejecting trailing non-space bytes.
pub(crate) fn from_json_exact<T>(data: &[u8]) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    let mut stream = serde_json::Deserializer::from_slice(data).into_iter::<T>();
    let value = match stream.next() {
        Some(value) => value?,
        None => return Err(Error::UnexpectedEnd),
    };
    let rest = &data[stream.byte_offset()..];
    let remaining = rest.iter().filter(|b| !b.is_ascii_whitespace()).count();
    if remaining != 0 {
        return Err(Error::TrailingData { remaining });
    }
    Ok(value)
}

/// Encodes the document into the schema+data envelope.
pub fn marshal(doc: &Document) -> Result<Vec<u8>, Error> {
    let schema = Schema::of_document(doc);

    let mut buf = Vec::new();
    buf.extend_from_slice(b"{\"$s\":");
    buf.extend_from_slice(&schema.encode()?);
    for (key, value) in doc.iter() {
        buf.push(b',');
        buf.extend_from_slice(&string::encode(key));
        buf.push(b':');
        buf.extend_from_slice(&encode_value(value));
    }
    buf.push(b'}');
    Ok(buf)
}

/// Encodes one value without an enclosing envelope, for use in a query
/// predicate position. The value carries its own type, so no schema is
/// needed on this direction.
pub fn marshal_single_value(value: &Value) -> Result<Vec<u8>, Error> {
    Ok(encode_value(value))
}

/// Decodes an envelope produced by [`marshal`], under default [`Limits`].
pub fn unmarshal(data: &[u8]) -> Result<Document, Error> {
    unmarshal_with(data, &Limits::default())
}

/// Decodes an envelope with caller-supplied limits.
///
/// The schema is extracted and validated first; the remaining fields are
/// then decoded in schema key order, so the result preserves the original
/// document's key order regardless of the JSON field order.
pub fn unmarshal_with(data: &[u8], limits: &Limits) -> Result<Document, Error> {
    if data.len() > limits.max_bytes {
        return Err(Error::TooLarge {
            size: data.len(),
            max: limits.max_bytes,
        });
    }

    let outer: serde_json::Map<String, Json> = from_json_exact(data)?;

    let schema_json = outer
        .get(SCHEMA_KEY)
        .ok_or(Error::MissingSchema("document envelope"))?;
    let schema = Schema::from_json(schema_json)?;

    let data_fields = outer.len() - 1;
    if schema.keys.len() != data_fields {
        return Err(Error::KeyCountMismatch {
            schema_keys: schema.keys.len(),
            data_fields,
        });
    }

    let mut doc = Document::with_capacity(schema.keys.len());
    for key in &schema.keys {
        if key == SCHEMA_KEY {
            // The reserved key is never data.
            return Err(Error::MissingKey(key.clone()));
        }
        let field = outer.get(key).ok_or_else(|| Error::MissingKey(key.clone()))?;
        let value = decode_value(field, schema.properties.get(key), 1, limits)?;
        doc.insert(key.clone(), value);
    }
    Ok(doc)
}

/// Decodes one value (no envelope) by the given descriptor, under default
/// [`Limits`]. A JSON `null` decodes to [`Value::Null`] without consulting
/// the descriptor; for any other data the descriptor is required.
pub fn unmarshal_single_value(data: &[u8], elem: Option<&SchemaElem>) -> Result<Value, Error> {
    let json: Json = from_json_exact(data)?;
    decode_value(&json, elem, 1, &Limits::default())
}

/// Encodes one value by its own tag.
pub(crate) fn encode_value(value: &Value) -> Vec<u8> {
    match value {
        Value::Document(d) => document::encode(d),
        Value::Array(a) => array::encode(a),
        Value::Double(v) => double::encode(*v),
        Value::String(s) => string::encode(s),
        Value::Binary(b) => binary::encode(b),
        Value::ObjectId(id) => object_id::encode(id),
        Value::Bool(v) => boolean::encode(*v),
        Value::DateTime(dt) => datetime::encode(dt),
        Value::Null => b"null".to_vec(),
        Value::Regex(r) => regex::encode(r),
        Value::Int32(v) => int32::encode(*v),
        Value::Timestamp(ts) => timestamp::encode(ts),
        Value::Int64(v) => int64::encode(*v),
    }
}

/// Decodes one generic JSON node by its descriptor.
///
/// JSON `null` maps to [`Value::Null`] before the descriptor is consulted;
/// scalar decoders are never reached with a null (they panic if they are).
/// A `null` descriptor against non-null data cannot be produced by
/// [`marshal`] and panics as a contract violation.
pub(crate) fn decode_value(
    json: &Json,
    elem: Option<&SchemaElem>,
    depth: usize,
    limits: &Limits,
) -> Result<Value, Error> {
    if json.is_null() {
        return Ok(Value::Null);
    }

    let elem = elem.ok_or(Error::MissingSchema("value descriptor"))?;

    if depth > limits.max_depth {
        return Err(Error::DepthExceeded {
            max: limits.max_depth,
        });
    }

    match elem.elem_type {
        ElemType::Object => {
            let schema = elem
                .schema
                .as_deref()
                .ok_or(Error::MissingSchema("object schema"))?;
            document::decode(json, schema, depth + 1, limits).map(Value::Document)
        }
        ElemType::Array => {
            let items = elem
                .items
                .as_deref()
                .ok_or(Error::MissingSchema("array items"))?;
            array::decode(json, items, depth + 1, limits).map(Value::Array)
        }
        ElemType::Double => double::decode(json).map(Value::Double),
        ElemType::String => string::decode(json).map(Value::String),
        ElemType::BinData => binary::decode(json, elem).map(Value::Binary),
        ElemType::ObjectId => object_id::decode(json).map(Value::ObjectId),
        ElemType::Bool => boolean::decode(json).map(Value::Bool),
        ElemType::Date => datetime::decode(json).map(Value::DateTime),
        ElemType::Null => panic!("null descriptor dispatched for non-null data"),
        ElemType::Regex => regex::decode(json, elem).map(Value::Regex),
        ElemType::Int => int32::decode(json).map(Value::Int32),
        ElemType::Timestamp => timestamp::decode(json).map(Value::Timestamp),
        ElemType::Long => int64::decode(json).map(Value::Int64),
    }
}
