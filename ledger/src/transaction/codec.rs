//! Compact binary and structured-text encodings.
//!
//! ## Compact binary
//!
//! ```text
//! [WIRE_FORMAT_VERSION: 1 byte] [bincode payload]
//! ```
//!
//! The payload is bincode 1.x with fixed-width integers, a size limit of
//! [`MAX_ENCODED_TX_BYTES`], and trailing bytes rejected. Used for storage
//! and wire transfer.
//!
//! ## Structured text
//!
//! Plain JSON with snake_case keys, decimal-string big integers and hex byte
//! strings. Used for interchange, debugging, and the reward weight metric.
//!
//! The two forms don't interoperate. Each decoder rejects the other's bytes.

use std::io::Write;

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{DecodingError, EncodingError, TxResult};
use crate::config::{MAX_ENCODED_TX_BYTES, WIRE_FORMAT_VERSION};

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_ENCODED_TX_BYTES)
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

fn binary_encoding_error(err: bincode::Error) -> EncodingError {
    match *err {
        bincode::ErrorKind::Io(io) => EncodingError::Io(io),
        other => EncodingError::Binary(other.to_string()),
    }
}

fn json_encoding_error(err: serde_json::Error) -> EncodingError {
    if err.is_io() {
        EncodingError::Io(err.into())
    } else {
        EncodingError::Json(err.to_string())
    }
}

// -- Compact binary ---------------------------------------------------------

/// Writes the version byte and the bincode payload into `out`.
pub fn encode_binary<T, W>(value: &T, out: &mut W) -> TxResult<()>
where
    T: Serialize + ?Sized,
    W: Write + ?Sized,
{
    out.write_all(&[WIRE_FORMAT_VERSION])
        .map_err(EncodingError::Io)?;
    wire_options()
        .serialize_into(out, value)
        .map_err(binary_encoding_error)?;
    Ok(())
}

/// Encodes into a fresh buffer.
pub fn encode_binary_to_vec<T: Serialize + ?Sized>(value: &T) -> TxResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    encode_binary(value, &mut buf)?;
    Ok(buf)
}

/// Decodes a value previously written by [`encode_binary`].
pub fn decode_binary<T: DeserializeOwned>(bytes: &[u8]) -> TxResult<T> {
    let (&version, payload) = bytes.split_first().ok_or(DecodingError::Empty)?;
    if version != WIRE_FORMAT_VERSION {
        tracing::debug!(version, "rejecting binary input with unknown version byte");
        return Err(DecodingError::UnsupportedVersion {
            expected: WIRE_FORMAT_VERSION,
            got: version,
        }
        .into());
    }

    wire_options().deserialize(payload).map_err(|e| {
        tracing::debug!(error = %e, len = bytes.len(), "malformed binary input");
        DecodingError::Binary(e.to_string()).into()
    })
}

// -- Structured text --------------------------------------------------------

/// Writes the JSON form into `out`. No trailing newline.
pub fn encode_json<T, W>(value: &T, out: &mut W) -> TxResult<()>
where
    T: Serialize + ?Sized,
    W: Write + ?Sized,
{
    serde_json::to_writer(out, value).map_err(json_encoding_error)?;
    Ok(())
}

pub fn encode_json_to_vec<T: Serialize + ?Sized>(value: &T) -> TxResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    encode_json(value, &mut buf)?;
    Ok(buf)
}

/// Decodes a value from its JSON form. Trailing non-whitespace is rejected.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> TxResult<T> {
    if bytes.is_empty() {
        return Err(DecodingError::Empty.into());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, len = bytes.len(), "malformed json input");
        DecodingError::Json(e.to_string()).into()
    })
}
