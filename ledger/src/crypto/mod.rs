//! # Cryptographic Primitives
//!
//! The hashing collaborator for the ledger: the [`Hash`] value type, BLAKE3
//! helpers, and the Merkle tree used for aggregate roots.
//!
//! Everything here is a thin wrapper around the `blake3` crate. Signatures are
//! opaque bytes to this crate, so there are no signing primitives here.

pub mod hash;
pub mod merkle;

pub use hash::{blake3_hash, blake3_hash_multi, domain_separated_hash, Hash, HashError};
pub use merkle::{empty_root, merkle_root, MerkleProof, MerkleTree, ProofStep};
