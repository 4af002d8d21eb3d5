//! Serde helpers for fields that need different shapes in text and binary.
//!
//! JSON gets readable values (hex for bytes, decimal strings for big
//! integers). Bincode gets compact ones (raw bytes, big-endian magnitudes).
//! The switch is `is_human_readable()`, so one derive serves both encodings.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minimal big-endian magnitude of `value`. Zero is the empty byte string.
pub fn big_endian_magnitude(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

fn parse_decimal(s: &str) -> Result<BigUint, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected a decimal integer, got {s:?}"));
    }
    if s.len() > 1 && s.starts_with('0') {
        return Err(format!("leading zeros are not canonical: {s:?}"));
    }
    s.parse::<BigUint>().map_err(|e| e.to_string())
}

fn parse_magnitude(bytes: &[u8]) -> Result<BigUint, String> {
    if bytes.first() == Some(&0) {
        return Err("big-endian magnitude has a leading zero byte".to_string());
    }
    Ok(BigUint::from_bytes_be(bytes))
}

struct BigUintRef<'a>(&'a BigUint);

impl Serialize for BigUintRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.0.to_str_radix(10))
        } else {
            big_endian_magnitude(self.0).serialize(serializer)
        }
    }
}

struct BigUintOwned(BigUint);

impl<'de> Deserialize<'de> for BigUintOwned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            parse_decimal(&s)
        } else {
            let bytes = Vec::<u8>::deserialize(deserializer)?;
            parse_magnitude(&bytes)
        };
        value.map(Self).map_err(serde::de::Error::custom)
    }
}

/// Optional arbitrary-precision unsigned integers.
///
/// `None` is written as `null` / the bincode `None` tag and reads back as
/// `None`, never as zero. Pair with `#[serde(default)]` so a missing JSON key
/// also reads as `None`.
pub mod biguint_opt {
    use super::*;

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&BigUintRef(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<BigUintOwned>::deserialize(deserializer).map(|v| v.map(|owned| owned.0))
    }
}

/// Variable-length byte strings: hex in JSON, raw bytes in bincode.
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(bytes))
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(&s).map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}
