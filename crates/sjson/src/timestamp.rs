//! Timestamp scalar codec.
//!
//! The raw 64-bit unsigned counter travels as a JSON number.

use serde_json::Value as Json;
use sjson_types::Timestamp;

use crate::error::Error;

pub(crate) fn encode(value: &Timestamp) -> Vec<u8> {
    value.as_u64().to_string().into_bytes()
}

pub(crate) fn decode(json: &Json) -> Result<Timestamp, Error> {
    if json.is_null() {
        panic!("null data");
    }
    json.as_u64()
        .map(Timestamp::from_raw)
        .ok_or_else(|| Error::bad("timestamp", "expected an unsigned JSON integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_round_trip() {
        let ts = Timestamp::new(1_652_218_461, 14);
        let encoded = encode(&ts);
        assert_eq!(encoded, b"7096224255842451470");
        assert_eq!(
            decode(&serde_json::json!(7096224255842451470u64)).unwrap(),
            ts
        );
    }

    #[test]
    fn max_counter() {
        assert_eq!(encode(&Timestamp::from_raw(u64::MAX)), b"18446744073709551615");
        assert_eq!(
            decode(&serde_json::json!(u64::MAX)).unwrap(),
            Timestamp::from_raw(u64::MAX)
        );
    }

    #[test]
    fn negative_is_rejected() {
        let err = decode(&serde_json::json!(-1)).unwrap_err();
        assert!(matches!(err, Error::BadValue { target: "timestamp", .. }));
    }
}
