//! Insertion-ordered document type.

use indexmap::IndexMap;
use thiserror::Error;

use crate::Value;

/// Error produced while constructing a [`Document`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),
}

/// An ordered mapping from field names to values.
///
/// Key order is significant: it survives every encode/decode cycle, and two
/// documents with the same pairs in a different order are not equal.
/// Duplicate field names are not supported.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a document from key/value pairs, rejecting duplicate keys.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let pairs = pairs.into_iter();
        let mut doc = Self::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            if doc.fields.contains_key(&key) {
                return Err(DocumentError::DuplicateKey(key));
            }
            doc.fields.insert(key, value);
        }
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a field. An existing key keeps its position; a new key is
    /// appended. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes a field, preserving the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Order-sensitive equality.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}
