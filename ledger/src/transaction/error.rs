//! Error types for transaction construction and encoding.
//!
//! Three families, one per way an operation can go wrong:
//!
//! - [`ValidationError`]: a field the operation needs is missing or invalid.
//! - [`EncodingError`]: the output sink refused the bytes.
//! - [`DecodingError`]: the input bytes aren't a well-formed encoding.
//!
//! Hashing has no error type. It's total over in-memory values.

use thiserror::Error;

/// Shorthand result for transaction operations.
pub type TxResult<T> = Result<T, TransactionError>;

/// Top-level error for every fallible transaction operation.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),
}

impl TransactionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_))
    }
}

/// A required field was missing or structurally invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A byte string that must be non-empty was empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// An accumulator would exceed its numeric range.
    #[error("{field} overflow: {current} + {added} does not fit in u64")]
    Overflow {
        field: &'static str,
        current: u64,
        added: u64,
    },

    /// A derived value is too large for the field it feeds.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// The byte sink rejected a write, or the value exceeds the size limit.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary encoding failed: {0}")]
    Binary(String),

    #[error("json encoding failed: {0}")]
    Json(String),
}

/// Input bytes don't match the grammar of the selected encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    #[error("input is empty")]
    Empty,

    #[error("unsupported wire format version: expected {expected:#04x}, got {got:#04x}")]
    UnsupportedVersion { expected: u8, got: u8 },

    #[error("malformed binary encoding: {0}")]
    Binary(String),

    #[error("malformed json encoding: {0}")]
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        let v: TransactionError = ValidationError::EmptyField {
            field: "lucky_miner",
        }
        .into();
        assert!(v.is_validation());
        assert!(!v.is_decoding());

        let d: TransactionError = DecodingError::Empty.into();
        assert!(d.is_decoding());

        let e: TransactionError = EncodingError::Binary("limit".into()).into();
        assert!(e.is_encoding());
    }

    #[test]
    fn messages_carry_context() {
        let err = DecodingError::UnsupportedVersion {
            expected: 0x01,
            got: 0x7b,
        };
        assert_eq!(
            err.to_string(),
            "unsupported wire format version: expected 0x01, got 0x7b"
        );

        let err = ValidationError::EmptyField {
            field: "lucky_miner",
        };
        assert_eq!(err.to_string(), "lucky_miner must not be empty");
    }
}
