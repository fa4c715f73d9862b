//! Decode and encode failure kinds.

use thiserror::Error;

/// Every failure the codec reports.
///
/// Data-originated problems come back as one of these variants, with enough
/// context (field names, expected vs. actual counts) to surface to a
/// client. Contract violations, such as a scalar decoder fed a JSON `null`,
/// panic instead of returning.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON syntax or shape, as reported by the parser.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input ended before a JSON value was read.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Bytes remain after the single expected JSON value.
    #[error("{remaining} bytes remain after the JSON value")]
    TrailingData { remaining: usize },

    /// A JSON object carries a field the target shape does not recognize.
    #[error("unknown field {field:?} in {target}")]
    UnknownField { target: &'static str, field: String },

    /// A schema element carries a type tag outside the known set.
    #[error("unknown type tag {tag:?}")]
    UnknownTag { tag: String },

    /// A required schema (or schema part) is absent.
    #[error("schema is not set for {0}")]
    MissingSchema(&'static str),

    /// Schema key count and data field count disagree.
    #[error(
        "the data must have the same number of schema keys and document fields \
         (keys: {schema_keys}, fields: {data_fields})"
    )]
    KeyCountMismatch {
        schema_keys: usize,
        data_fields: usize,
    },

    /// Schema item count and array element count disagree.
    #[error(
        "the data must have the same number of schema items and array elements \
         (items: {schema_items}, elements: {data_elements})"
    )]
    ItemCountMismatch {
        schema_items: usize,
        data_elements: usize,
    },

    /// A key declared by the schema is missing from the data.
    #[error("missing key {0:?}")]
    MissingKey(String),

    /// A decoded byte sequence has the wrong length.
    #[error("{target}: expected {expected} bytes, got {actual}")]
    BadLength {
        target: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Syntactically valid JSON that is semantically invalid for its
    /// declared type.
    #[error("invalid {target} value: {message}")]
    BadValue {
        target: &'static str,
        message: String,
    },

    /// Nesting deeper than the configured limit.
    #[error("document nesting exceeds {max} levels")]
    DepthExceeded { max: usize },

    /// Envelope larger than the configured limit.
    #[error("document of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },
}

impl Error {
    pub(crate) fn bad(target: &'static str, message: impl Into<String>) -> Self {
        Error::BadValue {
            target,
            message: message.into(),
        }
    }
}
