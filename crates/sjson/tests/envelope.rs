//! Envelope-level tests: golden encodings, round trips, and structural
//! failures.

use sjson::{marshal, unmarshal, unmarshal_with, Error, Limits};
use sjson_types::{Array, Binary, DateTime, Document, ObjectId, Regex, Timestamp, Value};

fn doc(pairs: Vec<(&str, Value)>) -> Document {
    Document::from_pairs(pairs.into_iter().map(|(k, v)| (k.to_string(), v))).unwrap()
}

#[test]
fn basic_envelope_golden() {
    let d = doc(vec![
        (
            "_id",
            Value::ObjectId(ObjectId([
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x11,
            ])),
        ),
        ("name", Value::String("foo".to_string())),
        ("count", Value::Int64(42)),
    ]);

    let encoded = marshal(&d).unwrap();
    let expected = concat!(
        r#"{"$s":{"p":{"_id":{"t":"objectId"},"name":{"t":"string"},"count":{"t":"long"}},"#,
        r#""$k":["_id","name","count"]},"#,
        r#""_id":"000102030405060708091011","name":"foo","count":42}"#,
    );
    assert_eq!(String::from_utf8(encoded.clone()).unwrap(), expected);

    let decoded = unmarshal(&encoded).unwrap();
    assert_eq!(decoded, d);
    assert_eq!(
        decoded.keys().collect::<Vec<_>>(),
        vec!["_id", "name", "count"]
    );
}

#[test]
fn empty_document_envelope() {
    let d = Document::new();
    let encoded = marshal(&d).unwrap();
    assert_eq!(encoded, br#"{"$s":{}}"#);
    assert_eq!(unmarshal(&encoded).unwrap(), d);
}

#[test]
fn nested_document_data_is_a_plain_object() {
    let d = doc(vec![(
        "client",
        Value::Document(doc(vec![("driver", Value::String("x".to_string()))])),
    )]);

    let encoded = marshal(&d).unwrap();
    let expected = concat!(
        r#"{"$s":{"p":{"client":{"t":"object","$s":{"p":{"driver":{"t":"string"}},"#,
        r#""$k":["driver"]}}},"$k":["client"]},"#,
        r#""client":{"driver":"x"}}"#,
    );
    assert_eq!(String::from_utf8(encoded.clone()).unwrap(), expected);
    assert_eq!(unmarshal(&encoded).unwrap(), d);
}

#[test]
fn key_order_survives_the_round_trip() {
    let d = doc(vec![
        ("zebra", Value::Int32(1)),
        ("alpha", Value::Int32(2)),
        ("mike", Value::Int32(3)),
    ]);
    let decoded = unmarshal(&marshal(&d).unwrap()).unwrap();
    assert_eq!(
        decoded.keys().collect::<Vec<_>>(),
        vec!["zebra", "alpha", "mike"]
    );
    assert_eq!(decoded, d);
}

#[test]
fn all_types_round_trip() {
    let inner = doc(vec![
        (
            "arr",
            Value::Array(Array::from(vec![
                Value::Int32(42),
                Value::Timestamp(Timestamp::new(1_652_218_461, 14)),
            ])),
        ),
        ("bar", Value::Null),
        ("baz", Value::Int64(9_007_199_254_740_993)),
    ]);

    let d = doc(vec![
        ("_id", Value::ObjectId(ObjectId([0x62; 12]))),
        (
            "arr",
            Value::Array(Array::from(vec![
                Value::Bool(true),
                Value::DateTime(DateTime::from_millis(-6_795_364_578_871)),
                Value::Regex(Regex::new("foo$", "i")),
                Value::Document(inner),
            ])),
        ),
        ("data", Value::Binary(Binary::new(0x80, vec![0x2a, 0x00, 0x0d]))),
        ("empty", Value::Binary(Binary::new(0x00, Vec::new()))),
        ("distance", Value::Double(42.13)),
        ("nan", Value::Double(f64::NAN)),
        ("neg_zero", Value::Double(-0.0)),
        ("pos_inf", Value::Double(f64::INFINITY)),
        ("neg_inf", Value::Double(f64::NEG_INFINITY)),
        ("name", Value::String("foo".to_string())),
        ("none", Value::Null),
    ]);

    let decoded = unmarshal(&marshal(&d).unwrap()).unwrap();
    assert_eq!(decoded, d);

    // The equality above is NaN-tolerant; pin the sign bit explicitly too.
    match decoded.get("neg_zero") {
        Some(Value::Double(z)) => assert!(z.is_sign_negative()),
        other => panic!("unexpected value: {other:?}"),
    }
    match decoded.get("nan") {
        Some(Value::Double(n)) => assert!(n.is_nan()),
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn handshake_document_round_trip() {
    let d = doc(vec![
        ("ismaster", Value::Bool(true)),
        (
            "client",
            Value::Document(doc(vec![
                (
                    "driver",
                    Value::Document(doc(vec![
                        ("name", Value::String("nodejs".to_string())),
                        ("version", Value::String("4.0.0-beta.6".to_string())),
                    ])),
                ),
                (
                    "os",
                    Value::Document(doc(vec![
                        ("type", Value::String("Darwin".to_string())),
                        ("name", Value::String("darwin".to_string())),
                        ("architecture", Value::String("x64".to_string())),
                        ("version", Value::String("20.6.0".to_string())),
                    ])),
                ),
                (
                    "platform",
                    Value::String("Node.js v14.17.3, LE (unified)".to_string()),
                ),
            ])),
        ),
        (
            "compression",
            Value::Array(Array::from(vec![Value::String("none".to_string())])),
        ),
        ("loadBalanced", Value::Bool(false)),
    ]);

    let decoded = unmarshal(&marshal(&d).unwrap()).unwrap();
    assert_eq!(decoded, d);
}

#[test]
fn key_count_mismatch_names_two_and_three() {
    let encoded = concat!(
        r#"{"$s":{"p":{"a":{"t":"int"},"b":{"t":"int"}},"$k":["a","b"]},"#,
        r#""a":1,"b":2,"c":3}"#,
    );
    let err = unmarshal(encoded.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        Error::KeyCountMismatch {
            schema_keys: 2,
            data_fields: 3,
        }
    ));
    let message = err.to_string();
    assert!(message.contains('2') && message.contains('3'));
}

#[test]
fn missing_schema_field_is_rejected() {
    let err = unmarshal(br#"{"a":1}"#).unwrap_err();
    assert!(matches!(err, Error::MissingSchema("document envelope")));
}

#[test]
fn missing_declared_key_is_rejected() {
    let encoded = br#"{"$s":{"p":{"a":{"t":"int"}},"$k":["a"]},"b":1}"#;
    let err = unmarshal(encoded).unwrap_err();
    assert!(matches!(err, Error::MissingKey(ref key) if key == "a"));
}

#[test]
fn key_without_descriptor_only_accepts_null() {
    // "b" is listed in the key order but has no descriptor.
    let ok = br#"{"$s":{"p":{"a":{"t":"int"}},"$k":["a","b"]},"a":1,"b":null}"#;
    let decoded = unmarshal(ok).unwrap();
    assert_eq!(decoded.get("b"), Some(&Value::Null));

    let bad = br#"{"$s":{"p":{"a":{"t":"int"}},"$k":["a","b"]},"a":1,"b":2}"#;
    let err = unmarshal(bad).unwrap_err();
    assert!(matches!(err, Error::MissingSchema("value descriptor")));
}

#[test]
fn object_descriptor_without_schema_is_rejected() {
    let encoded = br#"{"$s":{"p":{"a":{"t":"object"}},"$k":["a"]},"a":{}}"#;
    let err = unmarshal(encoded).unwrap_err();
    assert!(matches!(err, Error::MissingSchema("object schema")));
}

#[test]
fn array_descriptor_without_items_is_rejected() {
    let encoded = br#"{"$s":{"p":{"a":{"t":"array"}},"$k":["a"]},"a":[]}"#;
    let err = unmarshal(encoded).unwrap_err();
    assert!(matches!(err, Error::MissingSchema("array items")));
}

#[test]
fn trailing_envelope_bytes_are_rejected() {
    let err = unmarshal(br#"{"$s":{}} x"#).unwrap_err();
    assert!(matches!(err, Error::TrailingData { .. }));
}

#[test]
fn unknown_schema_field_is_rejected() {
    let err = unmarshal(br#"{"$s":{"q":{}}}"#).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownField { target: "schema", ref field } if field == "q"
    ));
}

#[test]
fn depth_limit_is_enforced() {
    let mut d = doc(vec![("leaf", Value::Int32(1))]);
    for _ in 0..6 {
        d = doc(vec![("next", Value::Document(d))]);
    }
    let encoded = marshal(&d).unwrap();

    let tight = Limits {
        max_depth: 4,
        ..Limits::default()
    };
    let err = unmarshal_with(&encoded, &tight).unwrap_err();
    assert!(matches!(err, Error::DepthExceeded { max: 4 }));

    let roomy = Limits {
        max_depth: 16,
        ..Limits::default()
    };
    assert_eq!(unmarshal_with(&encoded, &roomy).unwrap(), d);
}

#[test]
fn size_limit_is_enforced() {
    let d = doc(vec![("name", Value::String("x".repeat(64)))]);
    let encoded = marshal(&d).unwrap();

    let tight = Limits {
        max_bytes: 16,
        ..Limits::default()
    };
    let err = unmarshal_with(&encoded, &tight).unwrap_err();
    assert!(matches!(err, Error::TooLarge { max: 16, .. }));
}

#[test]
fn reserved_key_in_key_order_is_rejected() {
    let encoded = br#"{"$s":{"p":{"$s":{"t":"int"}},"$k":["$s"]},"a":1}"#;
    let err = unmarshal(encoded).unwrap_err();
    assert!(matches!(err, Error::MissingKey(ref key) if key == "$s"));
}
