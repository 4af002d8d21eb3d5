// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Luncheon Ledger: Transaction Identity
//!
//! The transaction layer of the Luncheon ledger: how a transaction is
//! built, how its identity is derived, how it travels and how it is stored.
//!
//! ## Architecture
//!
//! - **crypto**: BLAKE3 hashing and the Merkle aggregate root.
//! - **transaction**: The transaction entity, its canonical identity hash,
//!   binary and JSON encodings, and the per-block reward accumulator.
//! - **storage**: Key-value persistence of encoded transactions over sled.
//! - **serde_helpers**: Hex and decimal forms for bytes and big integers.
//! - **config**: Protocol constants.
//!
//! ## Design Philosophy
//!
//! 1. An identity is a function of the fields, nothing else. Two nodes that
//!    agree on the fields agree on the hash.
//! 2. Derived values are never cached, so they can't go stale.
//! 3. Untrusted bytes produce errors, never panics.

pub mod config;
pub mod crypto;
pub mod serde_helpers;
pub mod storage;
pub mod transaction;

pub use crypto::hash::Hash;
pub use transaction::{RewardTransaction, Transaction, TransactionBuilder, TransactionError};
