//! Double scalar codec.
//!
//! Finite non-zero doubles are plain JSON numbers. Negative zero, the two
//! infinities, and NaN have no JSON literal and are string-encoded.

use serde_json::Value as Json;

use crate::error::Error;

pub(crate) fn encode(value: f64) -> Vec<u8> {
    if value.is_nan() {
        b"\"NaN\"".to_vec()
    } else if value == f64::INFINITY {
        b"\"Infinity\"".to_vec()
    } else if value == f64::NEG_INFINITY {
        b"\"-Infinity\"".to_vec()
    } else if value == 0.0 && value.is_sign_negative() {
        b"\"-0\"".to_vec()
    } else {
        serde_json::to_vec(&value).unwrap_or_else(|_| b"0".to_vec())
    }
}

pub(crate) fn decode(json: &Json) -> Result<f64, Error> {
    match json {
        Json::Null => panic!("null data"),
        Json::String(s) => match s.as_str() {
            "-0" => Ok(-0.0),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            other => Err(Error::bad(
                "double",
                format!("unrecognized string {other:?}"),
            )),
        },
        Json::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::bad("double", "number out of range")),
        _ => Err(Error::bad("double", "expected a JSON number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials_are_string_encoded() {
        assert_eq!(encode(f64::NAN), b"\"NaN\"");
        assert_eq!(encode(f64::INFINITY), b"\"Infinity\"");
        assert_eq!(encode(f64::NEG_INFINITY), b"\"-Infinity\"");
        assert_eq!(encode(-0.0), b"\"-0\"");
        assert_eq!(encode(0.0), b"0.0");
    }

    #[test]
    fn specials_round_trip() {
        assert!(decode(&Json::from("NaN".to_string())).unwrap().is_nan());
        assert_eq!(
            decode(&Json::from("Infinity".to_string())).unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            decode(&Json::from("-Infinity".to_string())).unwrap(),
            f64::NEG_INFINITY
        );
        let neg_zero = decode(&Json::from("-0".to_string())).unwrap();
        assert_eq!(neg_zero, 0.0);
        assert!(neg_zero.is_sign_negative());
    }

    #[test]
    fn plain_numbers_decode() {
        assert_eq!(decode(&serde_json::json!(42.13)).unwrap(), 42.13);
        assert_eq!(decode(&serde_json::json!(42)).unwrap(), 42.0);
        assert_eq!(decode(&serde_json::json!(-123.5)).unwrap(), -123.5);
    }

    #[test]
    fn unrecognized_string_is_rejected() {
        let err = decode(&Json::from("fast".to_string())).unwrap_err();
        assert!(matches!(err, Error::BadValue { target: "double", .. }));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let err = decode(&serde_json::json!(true)).unwrap_err();
        assert!(matches!(err, Error::BadValue { target: "double", .. }));
    }
}
