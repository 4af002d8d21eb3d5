//! # Transaction Module
//!
//! The transaction entity, its canonical identity, and its encodings.
//!
//! ## Architecture
//!
//! ```text
//! builder.rs  - Transaction entity + fluent TransactionBuilder
//! identity.rs - Canonical preimage and identity hash
//! codec.rs    - Compact binary (versioned bincode) and JSON encodings
//! reward.rs   - Per-block reward accumulator and its weight
//! types.rs    - Taxonomy: TransactionKind, BasicTransfer, ScriptedTransfer
//! gas.rs      - Gas unit (1 gas = 1 byte)
//! error.rs    - Validation / encoding / decoding errors
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] or [`Transaction::new`].
//! 2. **Identify**: [`Transaction::identity_hash`] over the current fields.
//! 3. **Sign**: an external signer signs the identity hash and stores the
//!    bytes with [`Transaction::set_signature`].
//! 4. **Ship / store**: [`Transaction::encode`] for the wire and the store,
//!    [`Transaction::to_json`] for interchange.
//! 5. **Reward**: the block's [`RewardTransaction`] is credited with each
//!    settled transaction's fee.
//!
//! ## Design Decisions
//!
//! - Amounts, thread ids and gas prices are `BigUint`. Negative values
//!   can't be represented, so magnitude-only hashing can't collide across signs.
//! - Nothing is cached. Every hash and encoding reflects the fields at call
//!   time.
//! - Hashing can't fail. Encoding and decoding return [`TransactionError`].

pub mod builder;
pub mod codec;
pub mod error;
pub mod gas;
pub mod identity;
pub mod reward;
pub mod types;

pub use builder::{Transaction, TransactionBuilder};
pub use error::{DecodingError, EncodingError, TransactionError, TxResult, ValidationError};
pub use gas::Gas;
pub use identity::{identity_hash, identity_preimage};
pub use reward::RewardTransaction;
pub use types::{BasicTransfer, ScriptedTransfer, TransactionKind, TransferInput};
