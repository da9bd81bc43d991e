//! JSON helpers for 64-bit integers.
//!
//! The fullnode API encodes u64 values as decimal strings so they survive
//! JavaScript clients. Fields opt in with `#[serde(with = "json::u64_str")]`.

use serde::Serialize;

pub mod u64_str {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Accepts both `"123"` and `123`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StrOrNum {
            Str(String),
            Num(u64),
        }

        match StrOrNum::deserialize(deserializer)? {
            StrOrNum::Str(s) => s.parse().map_err(de::Error::custom),
            StrOrNum::Num(n) => Ok(n),
        }
    }
}

/// Render a value for a log line. Serialization errors become a marker string.
pub fn to_log_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
