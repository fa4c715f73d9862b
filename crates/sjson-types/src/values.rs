//! Scalar carrier types for the document value model.

use std::time::{SystemTime, UNIX_EPOCH};

/// Binary subtype byte values assigned by the wire format.
///
/// The subtype is an open byte; values outside this list round-trip
/// unchanged.
pub mod subtype {
    /// Generic binary data.
    pub const GENERIC: u8 = 0x00;
    /// Function.
    pub const FUNCTION: u8 = 0x01;
    /// Binary (old).
    pub const BINARY_OLD: u8 = 0x02;
    /// UUID (old).
    pub const UUID_OLD: u8 = 0x03;
    /// UUID.
    pub const UUID: u8 = 0x04;
    /// MD5 digest.
    pub const MD5: u8 = 0x05;
    /// Encrypted value.
    pub const ENCRYPTED: u8 = 0x06;
    /// Start of the user-defined range.
    pub const USER: u8 = 0x80;
}

/// Binary data: raw bytes plus a one-byte subtype tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub subtype: u8,
    pub bytes: Vec<u8>,
}

impl Binary {
    pub fn new(subtype: u8, bytes: Vec<u8>) -> Self {
        Self { subtype, bytes }
    }
}

/// 12-byte object identifier, rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub [u8; 12]);

impl ObjectId {
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

/// Regular expression: a pattern string plus an options string.
///
/// Neither string may contain a NUL byte; callers own that precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub pattern: String,
    pub options: String,
}

impl Regex {
    pub fn new(pattern: impl Into<String>, options: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            options: options.into(),
        }
    }
}

/// Opaque 64-bit counter, conventionally split into a 32-bit seconds
/// component (high half) and a 32-bit ordinal (low half).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(seconds: u32, ordinal: u32) -> Self {
        Self((u64::from(seconds) << 32) | u64::from(ordinal))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn seconds(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn ordinal(&self) -> u32 {
        self.0 as u32
    }
}

/// Instant with millisecond precision, stored as milliseconds since the
/// Unix epoch (negative before the epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(i64);

impl DateTime {
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Converts a [`SystemTime`], truncating (never rounding) any
    /// sub-millisecond precision.
    pub fn from_system_time(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => Self(d.as_millis() as i64),
            Err(e) => Self(-(e.duration().as_millis() as i64)),
        }
    }
}
