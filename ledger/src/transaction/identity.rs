//! Canonical identity hash of a [`Transaction`].
//!
//! The identity is BLAKE3 in `derive_key` mode (context
//! [`TX_IDENTITY_CONTEXT`]) over a preimage built from a fixed, ordered
//! subset of the transaction's fields:
//!
//! ```text
//! version          u8                     IDENTITY_PREIMAGE_VERSION
//! token_hash       32 bytes
//! amount           optional integer
//! to               u64 BE length || bytes
//! from             u64 BE length || bytes
//! block_from_root  32 bytes
//! tx_from_root     32 bytes
//! thread_id        optional integer
//! gas              u64 BE
//! gas_price        optional integer
//! ```
//!
//! An optional integer is `0x00` when unset, or `0x01 || u64 BE length ||
//! minimal big-endian magnitude` when set (zero has an empty magnitude).
//! Every variable-length part carries its own length, so bytes can't move
//! from one field to a neighbour without changing the preimage.
//!
//! Signature, received time, and the raw reference lists are not hashed.
//! The lists only enter through their Merkle roots.

use num_bigint::BigUint;

use super::builder::Transaction;
use crate::config::{IDENTITY_PREIMAGE_VERSION, TX_IDENTITY_CONTEXT};
use crate::crypto::hash::{domain_separated_hash, Hash};
use crate::serde_helpers::big_endian_magnitude;

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    buf.extend_from_slice(bytes);
}

fn put_optional_integer(buf: &mut Vec<u8>, value: Option<&BigUint>) {
    match value {
        Some(v) => {
            buf.push(PRESENT);
            put_bytes(buf, &big_endian_magnitude(v));
        }
        None => buf.push(ABSENT),
    }
}

/// The exact bytes that get hashed into the identity (and that a signer
/// commits to).
pub fn identity_preimage(tx: &Transaction) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);

    buf.push(IDENTITY_PREIMAGE_VERSION);
    buf.extend_from_slice(tx.token_hash().as_bytes());
    put_optional_integer(&mut buf, tx.amount());
    put_bytes(&mut buf, tx.to());
    put_bytes(&mut buf, tx.from());
    buf.extend_from_slice(tx.block_from_root().as_bytes());
    buf.extend_from_slice(tx.tx_from_root().as_bytes());
    put_optional_integer(&mut buf, tx.thread_id());
    buf.extend_from_slice(&tx.gas().as_u64().to_be_bytes());
    put_optional_integer(&mut buf, tx.gas_price());

    buf
}

/// Identity hash of `tx` from its current field values. Not cached.
pub fn identity_hash(tx: &Transaction) -> Hash {
    Hash::new(domain_separated_hash(
        TX_IDENTITY_CONTEXT,
        &identity_preimage(tx),
    ))
}
