//! # Ledger Configuration & Constants
//!
//! Every identity-critical constant in Luncheon lives here. Changing any of
//! these after launch changes transaction identities or breaks decoding of
//! stored bytes, so treat each one as part of the wire contract.

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// The hash function behind identities and aggregate roots.
pub const PRIMARY_HASH_FUNCTION: &str = "BLAKE3";

/// Hash output length in bytes.
pub const HASH_LENGTH: usize = 32;

/// BLAKE3 `derive_key` context for transaction identity hashes. Keeps
/// identity digests disjoint from every other BLAKE3 use in the ledger.
pub const TX_IDENTITY_CONTEXT: &str = "luncheon 2026 transaction identity v1";

/// Version byte leading every identity preimage. Bump when the hashed
/// field set or its framing changes.
pub const IDENTITY_PREIMAGE_VERSION: u8 = 1;

/// Prefix for Merkle leaf nodes: `BLAKE3(0x00 || leaf)`.
pub const MERKLE_LEAF_PREFIX: u8 = 0x00;

/// Prefix for Merkle interior nodes: `BLAKE3(0x01 || left || right)`.
pub const MERKLE_NODE_PREFIX: u8 = 0x01;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Version byte leading every compact binary encoding.
///
/// `0x01` is deliberately outside the printable range, so JSON input (which
/// starts with `{` or whitespace) can never be mistaken for binary input.
pub const WIRE_FORMAT_VERSION: u8 = 0x01;

/// Upper bound on the bincode payload of a single encoded object. Protects
/// decoders from length prefixes that claim gigabytes.
pub const MAX_ENCODED_TX_BYTES: u64 = 256 * 1024;

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

/// Base subsidy every reward transaction starts from, before fees.
pub const BASE_BLOCK_SUBSIDY: u64 = 50_000_000;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Directory under which named stores are opened by default.
pub const DEFAULT_STORE_ROOT: &str = "saves/db";

/// Store name used for transactions when the operator doesn't pick one.
pub const DEFAULT_TX_STORE: &str = "transactions";
