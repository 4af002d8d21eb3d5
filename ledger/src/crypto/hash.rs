//! # Hashing Utilities
//!
//! Every digest in the ledger is BLAKE3: transaction identities, aggregate
//! roots, and asset identities all share the same 32-byte [`Hash`] type.
//! Call sites carry the meaning through naming (`token_hash`, `block_from`,
//! `tx_from`) rather than through separate wrapper types.
//!
//! ## Domain separation
//!
//! Identity hashes use BLAKE3's `derive_key` mode with a fixed context
//! string (see [`crate::config::TX_IDENTITY_CONTEXT`]). Merkle nodes use
//! one-byte prefixes instead, because they are hashed in bulk and the
//! prefix is all the separation a tree needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::HASH_LENGTH;

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A fixed-size 32-byte digest.
///
/// Serializes as a lowercase hex string in human-readable formats (JSON) and
/// as 32 raw bytes in binary formats (bincode).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash([u8; HASH_LENGTH]);

/// Errors from parsing a [`Hash`] out of untrusted input.
#[derive(Debug, Error, PartialEq)]
pub enum HashError {
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Hash {
    /// Wraps an existing 32-byte digest.
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash. Useful as a "native token" or placeholder value.
    pub const fn zero() -> Self {
        Self([0u8; HASH_LENGTH])
    }

    /// Hashes `data` with plain BLAKE3.
    pub fn digest(data: &[u8]) -> Self {
        Self(blake3_hash(data))
    }

    /// Copies a hash out of a slice, failing if the length is not 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; HASH_LENGTH] =
            bytes.try_into().map_err(|_| HashError::InvalidLength {
                expected: HASH_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Parses a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_LENGTH]
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_LENGTH] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; HASH_LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

// ---------------------------------------------------------------------------
// Hash functions
// ---------------------------------------------------------------------------

/// Compute the BLAKE3 hash of the input data.
///
/// # Example
///
/// ```
/// use luncheon_ledger::crypto::blake3_hash;
///
/// let hash = blake3_hash(b"luncheon");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Compute a domain-separated hash using BLAKE3 with a context string.
///
/// Uses BLAKE3's `derive_key` mode, so `domain_separated_hash("a", x)` and
/// `domain_separated_hash("b", x)` can never collide, and neither collides
/// with a plain [`blake3_hash`] of `x`.
pub fn domain_separated_hash(context: &str, data: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// The parts are fed to the hasher back to back with no framing, so the
/// caller is responsible for making the boundaries unambiguous (fixed
/// widths or a leading prefix byte).
pub fn blake3_hash_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
