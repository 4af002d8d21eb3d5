//! The transaction taxonomy.
//!
//! Besides the general [`Transaction`](super::Transaction), the ledger knows
//! three shapes of native-token movement:
//!
//! - [`RewardTransaction`](super::RewardTransaction): the block reward, one
//!   per block.
//! - [`BasicTransfer`]: a peer-to-peer transfer funded by several inputs
//!   and authorized by a single key.
//! - [`ScriptedTransfer`]: reserved for scripted transfers. It has no
//!   behavior yet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::hash::Hash;
use crate::crypto::merkle::merkle_root;
use crate::serde_helpers::hex_bytes;

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// Discriminant for the native transaction shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Block reward paid to the miner.
    Reward,
    /// Multi-input, single-key transfer.
    Basic,
    /// Scripted transfer (placeholder).
    Scripted,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reward => write!(f, "Reward"),
            Self::Basic => write!(f, "Basic"),
            Self::Scripted => write!(f, "Scripted"),
        }
    }
}

// ---------------------------------------------------------------------------
// BasicTransfer
// ---------------------------------------------------------------------------

/// One funding input of a [`BasicTransfer`]: an output of `tx_hash` in the
/// block at `block_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInput {
    pub block_number: u32,
    pub tx_hash: Hash,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicTransfer {
    pub inputs: Vec<TransferInput>,
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
}

impl BasicTransfer {
    pub fn new(inputs: Vec<TransferInput>, public_key: Vec<u8>) -> Self {
        Self { inputs, public_key }
    }

    /// Sum of input amounts, or `None` on overflow.
    pub fn total_input(&self) -> Option<u64> {
        self.inputs
            .iter()
            .try_fold(0u64, |acc, input| acc.checked_add(input.amount))
    }

    /// Aggregate root over the input transaction hashes, in input order.
    pub fn input_root(&self) -> Hash {
        let hashes: Vec<Hash> = self.inputs.iter().map(|input| input.tx_hash).collect();
        merkle_root(&hashes)
    }

    pub const fn kind(&self) -> TransactionKind {
        TransactionKind::Basic
    }
}

// ---------------------------------------------------------------------------
// ScriptedTransfer
// ---------------------------------------------------------------------------

/// Placeholder for scripted transfers. Carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedTransfer;

impl ScriptedTransfer {
    pub const fn kind(&self) -> TransactionKind {
        TransactionKind::Scripted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(n: u8, amount: u64) -> TransferInput {
        TransferInput {
            block_number: n as u32,
            tx_hash: Hash::digest(&[n]),
            amount,
        }
    }

    #[test]
    fn transaction_kind_display() {
        assert_eq!(TransactionKind::Reward.to_string(), "Reward");
        assert_eq!(TransactionKind::Basic.to_string(), "Basic");
        assert_eq!(TransactionKind::Scripted.to_string(), "Scripted");
    }

    #[test]
    fn total_input_sums_and_detects_overflow() {
        let t = BasicTransfer::new(vec![input(1, 40), input(2, 2)], vec![9; 32]);
        assert_eq!(t.total_input(), Some(42));

        let t = BasicTransfer::new(vec![input(1, u64::MAX), input(2, 1)], vec![]);
        assert_eq!(t.total_input(), None);

        assert_eq!(BasicTransfer::default().total_input(), Some(0));
    }

    #[test]
    fn input_root_is_order_sensitive() {
        let a = BasicTransfer::new(vec![input(1, 1), input(2, 1)], vec![]);
        let b = BasicTransfer::new(vec![input(2, 1), input(1, 1)], vec![]);
        assert_ne!(a.input_root(), b.input_root());
    }

    #[test]
    fn kinds() {
        assert_eq!(BasicTransfer::default().kind(), TransactionKind::Basic);
        assert_eq!(ScriptedTransfer.kind(), TransactionKind::Scripted);
    }

    #[test]
    fn basic_transfer_serde_roundtrip() {
        let t = BasicTransfer::new(vec![input(3, 500)], vec![0xAB; 32]);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(&"ab".repeat(32)));
        let back: BasicTransfer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
