//! Schema model: a recursive descriptor tree mirroring one document or
//! array value exactly, sufficient to disambiguate its JSON during decode.
//!
//! A schema is derived fresh from a value on every encode (bottom-up, one
//! pass) and parsed from the wire before any data field is interpreted on
//! decode. It is never mutated in place.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as Json;
use sjson_types::{Document, Value};

use crate::error::Error;
use crate::from_json_exact;

/// Type tag of one schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElemType {
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "binData")]
    BinData,
    #[serde(rename = "objectId")]
    ObjectId,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "regex")]
    Regex,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "long")]
    Long,
}

impl ElemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElemType::Object => "object",
            ElemType::Array => "array",
            ElemType::Double => "double",
            ElemType::String => "string",
            ElemType::BinData => "binData",
            ElemType::ObjectId => "objectId",
            ElemType::Bool => "bool",
            ElemType::Date => "date",
            ElemType::Null => "null",
            ElemType::Regex => "regex",
            ElemType::Int => "int",
            ElemType::Timestamp => "timestamp",
            ElemType::Long => "long",
        }
    }

    /// Returns the type tag describing the given value.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Document(_) => ElemType::Object,
            Value::Array(_) => ElemType::Array,
            Value::Double(_) => ElemType::Double,
            Value::String(_) => ElemType::String,
            Value::Binary(_) => ElemType::BinData,
            Value::ObjectId(_) => ElemType::ObjectId,
            Value::Bool(_) => ElemType::Bool,
            Value::DateTime(_) => ElemType::Date,
            Value::Null => ElemType::Null,
            Value::Regex(_) => ElemType::Regex,
            Value::Int32(_) => ElemType::Int,
            Value::Timestamp(_) => ElemType::Timestamp,
            Value::Int64(_) => ElemType::Long,
        }
    }

    fn from_tag(tag: &str) -> Result<Self, Error> {
        Ok(match tag {
            "object" => ElemType::Object,
            "array" => ElemType::Array,
            "double" => ElemType::Double,
            "string" => ElemType::String,
            "binData" => ElemType::BinData,
            "objectId" => ElemType::ObjectId,
            "bool" => ElemType::Bool,
            "date" => ElemType::Date,
            "null" => ElemType::Null,
            "regex" => ElemType::Regex,
            "int" => ElemType::Int,
            "timestamp" => ElemType::Timestamp,
            "long" => ElemType::Long,
            _ => {
                return Err(Error::UnknownTag {
                    tag: tag.to_string(),
                })
            }
        })
    }
}

impl fmt::Display for ElemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one document level: per-key descriptors plus the key order.
///
/// The key list is the document's own key list, in the same order (never
/// sorted). An empty document's schema serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "p", skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaElem>,
    #[serde(rename = "$k", skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl Schema {
    /// Derives the schema describing the given document.
    pub fn of_document(doc: &Document) -> Self {
        let mut properties = IndexMap::with_capacity(doc.len());
        for (key, value) in doc.iter() {
            properties.insert(key.to_string(), SchemaElem::of_value(value));
        }
        Schema {
            properties,
            keys: doc.keys().map(str::to_string).collect(),
        }
    }

    /// Serializes to the wire shape.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parses a schema from bytes, rejecting trailing data and unknown
    /// fields.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let json: Json = from_json_exact(data)?;
        Self::from_json(&json)
    }

    pub(crate) fn from_json(json: &Json) -> Result<Self, Error> {
        let obj = json
            .as_object()
            .ok_or_else(|| Error::bad("schema", "expected a JSON object"))?;

        let mut properties = IndexMap::new();
        let mut keys = Vec::new();

        for (key, value) in obj {
            match key.as_str() {
                "p" => {
                    let props = value
                        .as_object()
                        .ok_or_else(|| Error::bad("schema", "properties must be a JSON object"))?;
                    properties.reserve(props.len());
                    for (name, elem) in props {
                        properties.insert(name.clone(), SchemaElem::from_json(elem)?);
                    }
                }
                "$k" => {
                    let list = value
                        .as_array()
                        .ok_or_else(|| Error::bad("schema", "key list must be a JSON array"))?;
                    keys = list
                        .iter()
                        .map(|k| {
                            k.as_str()
                                .map(str::to_string)
                                .ok_or_else(|| Error::bad("schema", "keys must be JSON strings"))
                        })
                        .collect::<Result<_, _>>()?;
                }
                _ => {
                    return Err(Error::UnknownField {
                        target: "schema",
                        field: key.clone(),
                    })
                }
            }
        }

        Ok(Schema { properties, keys })
    }
}

/// One node of the schema tree: a type tag plus any type-specific side
/// data plain JSON cannot carry inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaElem {
    #[serde(rename = "t")]
    pub elem_type: ElemType,
    /// Nested schema, objects only.
    #[serde(rename = "$s", skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<Schema>>,
    /// Options string, regex only.
    #[serde(rename = "o", skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Per-element descriptors, arrays only.
    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SchemaElem>>,
    /// Subtype byte, binData only.
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub subtype: Option<u8>,
}

impl SchemaElem {
    /// A descriptor with no side data.
    pub fn scalar(elem_type: ElemType) -> Self {
        Self {
            elem_type,
            schema: None,
            options: None,
            items: None,
            subtype: None,
        }
    }

    /// Derives the descriptor for a single value, recursing into
    /// composites.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Document(d) => Self {
                schema: Some(Box::new(Schema::of_document(d))),
                ..Self::scalar(ElemType::Object)
            },
            Value::Array(a) => Self {
                items: Some(a.iter().map(Self::of_value).collect()),
                ..Self::scalar(ElemType::Array)
            },
            Value::Binary(b) => Self {
                subtype: Some(b.subtype),
                ..Self::scalar(ElemType::BinData)
            },
            Value::Regex(r) => Self {
                options: Some(r.options.clone()),
                ..Self::scalar(ElemType::Regex)
            },
            other => Self::scalar(ElemType::of_value(other)),
        }
    }

    pub(crate) fn from_json(json: &Json) -> Result<Self, Error> {
        let obj = json
            .as_object()
            .ok_or_else(|| Error::bad("schema element", "expected a JSON object"))?;

        let mut elem_type = None;
        let mut schema = None;
        let mut options = None;
        let mut items = None;
        let mut subtype = None;

        for (key, value) in obj {
            match key.as_str() {
                "t" => {
                    let tag = value
                        .as_str()
                        .ok_or_else(|| Error::bad("schema element", "type tag must be a string"))?;
                    elem_type = Some(ElemType::from_tag(tag)?);
                }
                "$s" => schema = Some(Box::new(Schema::from_json(value)?)),
                "o" => {
                    options = Some(
                        value
                            .as_str()
                            .ok_or_else(|| Error::bad("schema element", "options must be a string"))?
                            .to_string(),
                    );
                }
                "i" => {
                    let list = value
                        .as_array()
                        .ok_or_else(|| Error::bad("schema element", "items must be a JSON array"))?;
                    items = Some(
                        list.iter()
                            .map(Self::from_json)
                            .collect::<Result<Vec<_>, _>>()?,
                    );
                }
                "s" => {
                    let byte = value
                        .as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| Error::bad("schema element", "subtype must be a byte"))?;
                    subtype = Some(byte);
                }
                _ => {
                    return Err(Error::UnknownField {
                        target: "schema element",
                        field: key.clone(),
                    })
                }
            }
        }

        let elem_type = elem_type.ok_or(Error::MissingSchema("element type tag"))?;

        Ok(Self {
            elem_type,
            schema,
            options,
            items,
            subtype,
        })
    }
}
