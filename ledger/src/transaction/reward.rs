//! The per-block reward transaction.
//!
//! Exactly one per block. It starts at the base subsidy, is credited with
//! the fee of every transaction settled into the block, and is finally
//! pointed at the address that won the block.
//!
//! Its weight is derived on demand from its encoded size. Nothing caches
//! it, so a `credit` after a `weight` call is reflected in the next call.

use std::io::Write;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::builder::Transaction;
use super::codec;
use super::error::{TxResult, ValidationError};
use crate::config::BASE_BLOCK_SUBSIDY;
use crate::serde_helpers::hex_bytes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardTransaction {
    block_reward: u64,

    #[serde(with = "hex_bytes")]
    lucky_miner: Vec<u8>,
}

impl Default for RewardTransaction {
    fn default() -> Self {
        Self::new(BASE_BLOCK_SUBSIDY)
    }
}

impl RewardTransaction {
    /// A fresh reward starting at `base_subsidy`, with no recipient yet.
    pub fn new(base_subsidy: u64) -> Self {
        Self {
            block_reward: base_subsidy,
            lucky_miner: Vec::new(),
        }
    }

    pub fn block_reward(&self) -> u64 {
        self.block_reward
    }

    pub fn lucky_miner(&self) -> &[u8] {
        &self.lucky_miner
    }

    /// Overwrites the accumulated reward.
    pub fn set_block_reward(&mut self, block_reward: u64) {
        self.block_reward = block_reward;
    }

    /// Adds a settled transaction's fee and returns the new total.
    ///
    /// Fails instead of wrapping if the total would leave `u64`. The reward
    /// is left unchanged on failure.
    pub fn credit(&mut self, fee: u64) -> TxResult<u64> {
        self.block_reward = self
            .block_reward
            .checked_add(fee)
            .ok_or(ValidationError::Overflow {
                field: "block_reward",
                current: self.block_reward,
                added: fee,
            })?;
        Ok(self.block_reward)
    }

    /// Credits `tx.fee()`. A transaction without a gas price pays nothing.
    pub fn credit_transaction(&mut self, tx: &Transaction) -> TxResult<u64> {
        let fee = tx.fee().unwrap_or_default();
        let fee = fee.to_u64().ok_or_else(|| ValidationError::OutOfRange {
            field: "fee",
            value: fee.to_string(),
        })?;
        self.credit(fee)
    }

    /// Sets the reward recipient. An empty address is rejected and leaves
    /// the previous recipient in place.
    pub fn finalize(&mut self, lucky_miner: Vec<u8>) -> TxResult<()> {
        if lucky_miner.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "lucky_miner",
            }
            .into());
        }
        self.lucky_miner = lucky_miner;
        tracing::debug!(
            block_reward = self.block_reward,
            lucky_miner = %hex::encode(&self.lucky_miner),
            "reward transaction finalized"
        );
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        !self.lucky_miner.is_empty()
    }

    /// Byte length of the structured-text encoding of the current state.
    pub fn weight(&self) -> TxResult<u64> {
        codec::encode_json_to_vec(self).map(|bytes| bytes.len() as u64)
    }

    /// Byte length of the compact binary encoding. Unlike [`weight`], this
    /// doesn't move when the text format changes.
    ///
    /// [`weight`]: RewardTransaction::weight
    pub fn wire_size(&self) -> TxResult<u64> {
        codec::encode_binary_to_vec(self).map(|bytes| bytes.len() as u64)
    }

    pub fn encode(&self) -> TxResult<Vec<u8>> {
        codec::encode_binary_to_vec(self)
    }

    pub fn encode_into<W: Write + ?Sized>(&self, out: &mut W) -> TxResult<()> {
        codec::encode_binary(self, out)
    }

    pub fn decode(bytes: &[u8]) -> TxResult<Self> {
        codec::decode_binary(bytes)
    }

    pub fn to_json(&self) -> TxResult<Vec<u8>> {
        codec::encode_json_to_vec(self)
    }

    pub fn write_json<W: Write + ?Sized>(&self, out: &mut W) -> TxResult<()> {
        codec::encode_json(self, out)
    }

    pub fn from_json(bytes: &[u8]) -> TxResult<Self> {
        codec::decode_json(bytes)
    }
}
