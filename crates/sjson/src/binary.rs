//! Binary scalar codec.
//!
//! The payload travels as a base64 JSON string; the subtype byte travels in
//! the schema, not inline.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value as Json;
use sjson_types::Binary;

use crate::error::Error;
use crate::schema::SchemaElem;

pub(crate) fn encode(value: &Binary) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.bytes.len() * 4 / 3 + 6);
    out.push(b'"');
    out.extend_from_slice(STANDARD.encode(&value.bytes).as_bytes());
    out.push(b'"');
    out
}

pub(crate) fn decode(json: &Json, elem: &SchemaElem) -> Result<Binary, Error> {
    if json.is_null() {
        panic!("null data");
    }
    let subtype = elem.subtype.ok_or(Error::MissingSchema("binData subtype"))?;
    let payload = json
        .as_str()
        .ok_or_else(|| Error::bad("binData", "expected a base64 JSON string"))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::bad("binData", e.to_string()))?;
    Ok(Binary { subtype, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ElemType;

    fn bin_elem(subtype: u8) -> SchemaElem {
        SchemaElem {
            subtype: Some(subtype),
            ..SchemaElem::scalar(ElemType::BinData)
        }
    }

    #[test]
    fn payload_and_subtype_survive() {
        let value = Binary::new(0x80, vec![0x2a, 0x00, 0x0d]);
        let encoded = encode(&value);
        assert_eq!(encoded, br#""KgAN""#);

        let json = Json::from("KgAN".to_string());
        assert_eq!(decode(&json, &bin_elem(0x80)).unwrap(), value);
    }

    #[test]
    fn empty_payload() {
        let value = Binary::new(sjson_types::subtype::GENERIC, Vec::new());
        assert_eq!(encode(&value), br#""""#);
        let json = Json::from(String::new());
        assert_eq!(decode(&json, &bin_elem(0)).unwrap(), value);
    }

    #[test]
    fn missing_subtype_is_structural() {
        let json = Json::from("KgAN".to_string());
        let err = decode(&json, &SchemaElem::scalar(ElemType::BinData)).unwrap_err();
        assert!(matches!(err, Error::MissingSchema("binData subtype")));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let json = Json::from("not base64!".to_string());
        let err = decode(&json, &bin_elem(0)).unwrap_err();
        assert!(matches!(err, Error::BadValue { target: "binData", .. }));
    }
}
