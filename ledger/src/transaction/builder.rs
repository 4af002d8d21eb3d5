//! The [`Transaction`] entity and its fluent [`TransactionBuilder`].
//!
//! Fields are private. Every setter takes its value by value and every getter
//! hands out a shared borrow or a copy, so a caller can never keep a handle
//! that mutates the stored transaction behind its back. Derived values (roots,
//! identity hash, encodings) are recomputed on every call and reflect the
//! current field values.

use std::fmt;
use std::io::Write;

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::codec;
use super::error::TxResult;
use super::gas::Gas;
use super::identity;
use crate::crypto::hash::Hash;
use crate::crypto::merkle::merkle_root;
use crate::serde_helpers::{biguint_opt, hex_bytes};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transfer of some token from one party to another.
///
/// The token need not be the native one: `token_hash` names the asset.
/// `block_from` and `tx_from` point at the blocks and transactions whose
/// outputs fund this one, in a significant order.
///
/// # Identity
///
/// [`Transaction::identity_hash`] covers token_hash, amount, to, from, the
/// two reference roots, thread_id, gas and gas_price. Signature and
/// received_time are excluded, so signing or re-observing a transaction
/// doesn't change its identity.
///
/// # Unset integers
///
/// `amount`, `thread_id` and `gas_price` are `Option`s. A transaction built
/// without them reports `None`, hashes differently from an explicit zero,
/// and decodes back to `None` in both encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    token_hash: Hash,

    #[serde(default, with = "biguint_opt")]
    amount: Option<BigUint>,

    #[serde(with = "hex_bytes")]
    to: Vec<u8>,

    #[serde(with = "hex_bytes")]
    from: Vec<u8>,

    #[serde(with = "hex_bytes")]
    signature: Vec<u8>,

    block_from: Vec<Hash>,

    tx_from: Vec<Hash>,

    #[serde(default, with = "biguint_opt")]
    thread_id: Option<BigUint>,

    gas: Gas,

    #[serde(default, with = "biguint_opt")]
    gas_price: Option<BigUint>,

    /// When this node first saw the transaction. Local bookkeeping only.
    received_time: DateTime<Utc>,
}

impl Transaction {
    /// Full-field initializer. Performs no cross-field validation; signature
    /// checks and balance checks belong to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_hash: Hash,
        amount: BigUint,
        to: Vec<u8>,
        from: Vec<u8>,
        signature: Vec<u8>,
        block_from: Vec<Hash>,
        tx_from: Vec<Hash>,
        thread_id: BigUint,
        gas: Gas,
        gas_price: BigUint,
        received_time: DateTime<Utc>,
    ) -> Self {
        Self {
            token_hash,
            amount: Some(amount),
            to,
            from,
            signature,
            block_from,
            tx_from,
            thread_id: Some(thread_id),
            gas,
            gas_price: Some(gas_price),
            received_time,
        }
    }

    // -- Accessors ----------------------------------------------------------

    pub fn token_hash(&self) -> Hash {
        self.token_hash
    }

    pub fn amount(&self) -> Option<&BigUint> {
        self.amount.as_ref()
    }

    pub fn to(&self) -> &[u8] {
        &self.to
    }

    pub fn from(&self) -> &[u8] {
        &self.from
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn block_from(&self) -> &[Hash] {
        &self.block_from
    }

    pub fn tx_from(&self) -> &[Hash] {
        &self.tx_from
    }

    pub fn thread_id(&self) -> Option<&BigUint> {
        self.thread_id.as_ref()
    }

    pub fn gas(&self) -> Gas {
        self.gas
    }

    pub fn gas_price(&self) -> Option<&BigUint> {
        self.gas_price.as_ref()
    }

    pub fn received_time(&self) -> DateTime<Utc> {
        self.received_time
    }

    // -- Mutators -----------------------------------------------------------
    //
    // Changing any hashed field after signing invalidates the signature.
    // Nothing here clears it; that policy belongs to the signer.

    pub fn set_token_hash(&mut self, token_hash: Hash) {
        self.token_hash = token_hash;
    }

    pub fn set_amount(&mut self, amount: BigUint) {
        self.amount = Some(amount);
    }

    pub fn set_to(&mut self, to: Vec<u8>) {
        self.to = to;
    }

    pub fn set_from(&mut self, from: Vec<u8>) {
        self.from = from;
    }

    pub fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = signature;
    }

    pub fn set_block_from(&mut self, block_from: Vec<Hash>) {
        self.block_from = block_from;
    }

    pub fn set_tx_from(&mut self, tx_from: Vec<Hash>) {
        self.tx_from = tx_from;
    }

    pub fn set_thread_id(&mut self, thread_id: BigUint) {
        self.thread_id = Some(thread_id);
    }

    pub fn set_gas(&mut self, gas: Gas) {
        self.gas = gas;
    }

    pub fn set_gas_price(&mut self, gas_price: BigUint) {
        self.gas_price = Some(gas_price);
    }

    pub fn set_received_time(&mut self, received_time: DateTime<Utc>) {
        self.received_time = received_time;
    }

    // -- Derived values -----------------------------------------------------

    /// Merkle root over `block_from`, in list order.
    pub fn block_from_root(&self) -> Hash {
        merkle_root(&self.block_from)
    }

    /// Merkle root over `tx_from`, in list order.
    pub fn tx_from_root(&self) -> Hash {
        merkle_root(&self.tx_from)
    }

    /// The identity hash. This is what the sender signs.
    pub fn identity_hash(&self) -> Hash {
        identity::identity_hash(self)
    }

    /// The canonical preimage behind [`Transaction::identity_hash`].
    pub fn signable_bytes(&self) -> Vec<u8> {
        identity::identity_preimage(self)
    }

    /// `gas × gas_price`, or `None` when no price is set.
    pub fn fee(&self) -> Option<BigUint> {
        self.gas_price.as_ref().map(|price| self.gas.fee_at(price))
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    // -- Compact binary -----------------------------------------------------

    /// Encodes into a fresh buffer.
    pub fn encode(&self) -> TxResult<Vec<u8>> {
        codec::encode_binary_to_vec(self)
    }

    /// Encodes into a caller-supplied sink (e.g. a reused `Vec<u8>`).
    pub fn encode_into<W: Write + ?Sized>(&self, out: &mut W) -> TxResult<()> {
        codec::encode_binary(self, out)
    }

    pub fn decode(bytes: &[u8]) -> TxResult<Self> {
        codec::decode_binary(bytes)
    }

    /// Size of the compact binary form in bytes.
    pub fn encoded_len(&self) -> TxResult<usize> {
        self.encode().map(|bytes| bytes.len())
    }

    // -- Structured text ----------------------------------------------------

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

fn display_integer(value: Option<&BigUint>) -> String {
    value.map_or_else(|| "unset".to_string(), |v| v.to_string())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction {}", self.identity_hash())?;
        writeln!(f, "  token:     {}", self.token_hash)?;
        writeln!(f, "  amount:    {}", display_integer(self.amount()))?;
        writeln!(f, "  to:        {}", hex::encode(&self.to))?;
        writeln!(f, "  from:      {}", hex::encode(&self.from))?;
        writeln!(f, "  thread:    {}", display_integer(self.thread_id()))?;
        writeln!(f, "  gas:       {}", self.gas)?;
        write!(f, "  gas price: {}", display_integer(self.gas_price()))
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// # Usage
///
/// ```
/// use luncheon_ledger::crypto::Hash;
/// use luncheon_ledger::transaction::{Gas, TransactionBuilder};
///
/// let tx = TransactionBuilder::new()
///     .token_hash(Hash::zero())
///     .amount(500u64)
///     .to(b"bob".as_slice())
///     .from(b"alice".as_slice())
///     .thread_id(0u32)
///     .gas(Gas::new(120))
///     .gas_price(2u32)
///     .build();
///
/// assert!(!tx.is_signed());
/// assert_eq!(tx.fee(), Some(num_bigint::BigUint::from(240u32)));
/// ```
///
/// Integers left unset stay `None`. `received_time` defaults to the current
/// UTC time at `build()`.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    token_hash: Hash,
    amount: Option<BigUint>,
    to: Vec<u8>,
    from: Vec<u8>,
    signature: Vec<u8>,
    block_from: Vec<Hash>,
    tx_from: Vec<Hash>,
    thread_id: Option<BigUint>,
    gas: Gas,
    gas_price: Option<BigUint>,
    received_time: Option<DateTime<Utc>>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_hash(mut self, token_hash: Hash) -> Self {
        self.token_hash = token_hash;
        self
    }

    pub fn amount(mut self, amount: impl Into<BigUint>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn to(mut self, to: impl Into<Vec<u8>>) -> Self {
        self.to = to.into();
        self
    }

    pub fn from(mut self, from: impl Into<Vec<u8>>) -> Self {
        self.from = from.into();
        self
    }

    pub fn signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn block_from(mut self, block_from: Vec<Hash>) -> Self {
        self.block_from = block_from;
        self
    }

    pub fn tx_from(mut self, tx_from: Vec<Hash>) -> Self {
        self.tx_from = tx_from;
        self
    }

    pub fn thread_id(mut self, thread_id: impl Into<BigUint>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn gas(mut self, gas: Gas) -> Self {
        self.gas = gas;
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<BigUint>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    /// Sets the observation time explicitly. Otherwise `build()` uses now.
    pub fn received_time(mut self, received_time: DateTime<Utc>) -> Self {
        self.received_time = Some(received_time);
        self
    }

    pub fn build(self) -> Transaction {
        Transaction {
            token_hash: self.token_hash,
            amount: self.amount,
            to: self.to,
            from: self.from,
            signature: self.signature,
            block_from: self.block_from,
            tx_from: self.tx_from,
            thread_id: self.thread_id,
            gas: self.gas,
            gas_price: self.gas_price,
            received_time: self.received_time.unwrap_or_else(Utc::now),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    fn sample_tx() -> Transaction {
        Transaction::new(
            Hash::digest(b"native"),
            big("123456789012345678901234567890"),
            b"bob".to_vec(),
            b"alice".to_vec(),
            vec![0x5A; 64],
            vec![Hash::digest(b"block-a"), Hash::digest(b"block-b")],
            vec![Hash::digest(b"tx-a")],
            big("18446744073709551617"),
            Gas::new(204),
            big("1000000000"),
            Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap(),
        )
    }

    #[test]
    fn new_sets_every_field() {
        let tx = sample_tx();
        assert_eq!(tx.token_hash(), Hash::digest(b"native"));
        assert_eq!(tx.amount(), Some(&big("123456789012345678901234567890")));
        assert_eq!(tx.to(), b"bob");
        assert_eq!(tx.from(), b"alice");
        assert_eq!(tx.signature().len(), 64);
        assert_eq!(tx.block_from().len(), 2);
        assert_eq!(tx.tx_from().len(), 1);
        assert_eq!(tx.thread_id(), Some(&big("18446744073709551617")));
        assert_eq!(tx.gas(), Gas::new(204));
        assert_eq!(tx.gas_price(), Some(&big("1000000000")));
        assert_eq!(tx.received_time().timestamp(), 1_700_000_000);
    }

    #[test]
    fn setters_take_ownership() {
        let mut tx = sample_tx();
        let mut to = b"carol".to_vec();
        tx.set_to(to.clone());
        to.push(b'!');
        assert_eq!(tx.to(), b"carol", "caller's later edits must not leak in");
    }

    #[test]
    fn builder_matches_new() {
        let a = sample_tx();
        let b = TransactionBuilder::new()
            .token_hash(a.token_hash())
            .amount(a.amount().unwrap().clone())
            .to(a.to())
            .from(a.from())
            .signature(a.signature())
            .block_from(a.block_from().to_vec())
            .tx_from(a.tx_from().to_vec())
            .thread_id(a.thread_id().unwrap().clone())
            .gas(a.gas())
            .gas_price(a.gas_price().unwrap().clone())
            .received_time(a.received_time())
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn builder_leaves_integers_unset() {
        let tx = TransactionBuilder::new().build();
        assert!(tx.amount().is_none());
        assert!(tx.thread_id().is_none());
        assert!(tx.gas_price().is_none());
        assert!(tx.fee().is_none());
        assert!(tx.block_from().is_empty());
        assert!(!tx.is_signed());
    }

    #[test]
    fn builder_uses_current_time_if_not_set() {
        let before = Utc::now();
        let tx = TransactionBuilder::new().build();
        let after = Utc::now();
        assert!(tx.received_time() >= before);
        assert!(tx.received_time() <= after);
    }

    #[test]
    fn roots_follow_reference_lists() {
        let mut tx = sample_tx();
        assert_eq!(tx.block_from_root(), merkle_root(tx.block_from()));
        assert_eq!(tx.tx_from_root(), merkle_root(tx.tx_from()));

        let before = tx.block_from_root();
        tx.set_block_from(vec![Hash::digest(b"block-c")]);
        assert_ne!(tx.block_from_root(), before);
    }

    #[test]
    fn fee_is_gas_times_price() {
        let tx = sample_tx();
        assert_eq!(tx.fee().unwrap(), big("204000000000"));
    }

    #[test]
    fn signing_field_toggles_is_signed() {
        let mut tx = TransactionBuilder::new().build();
        assert!(!tx.is_signed());
        tx.set_signature(vec![1, 2, 3]);
        assert!(tx.is_signed());
    }

    #[test]
    fn signable_bytes_exclude_signature() {
        let mut tx = sample_tx();
        let before = tx.signable_bytes();
        tx.set_signature(vec![0xFF; 10]);
        assert_eq!(before, tx.signable_bytes());
    }

    #[test]
    fn display_summarizes_transaction() {
        let tx = sample_tx();
        let text = tx.to_string();
        assert!(text.starts_with(&format!("Transaction {}", tx.identity_hash())));
        assert!(text.contains("123456789012345678901234567890"));
        assert!(text.contains("626f62")); // "bob"
        assert!(text.contains("204 gas"));

        let unset = TransactionBuilder::new().build().to_string();
        assert!(unset.contains("amount:    unset"));
    }

    #[test]
    fn encoded_len_matches_encode() {
        let tx = sample_tx();
        assert_eq!(tx.encoded_len().unwrap(), tx.encode().unwrap().len());
    }

    #[test]
    fn binary_roundtrip_is_exact() {
        let tx = sample_tx();
        let decoded = Transaction::decode(&tx.encode().unwrap()).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(
            decoded.amount(),
            Some(&big("123456789012345678901234567890"))
        );
        assert_eq!(decoded.identity_hash(), tx.identity_hash());
    }

    #[test]
    fn json_roundtrip_is_exact() {
        let tx = sample_tx();
        let decoded = Transaction::from_json(&tx.to_json().unwrap()).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.received_time(), tx.received_time());
    }

    #[test]
    fn json_shape_is_readable() {
        let json = String::from_utf8(sample_tx().to_json().unwrap()).unwrap();
        assert!(json.contains(r#""amount":"123456789012345678901234567890""#));
        assert!(json.contains(r#""to":"626f62""#));
        assert!(json.contains(r#""gas":204"#));
        assert!(json.contains(r#""received_time":"2023-11-14T22:13:20.123456789Z""#));
    }

    #[test]
    fn unset_integers_roundtrip_as_none() {
        let tx = TransactionBuilder::new()
            .received_time(Utc.timestamp_opt(0, 0).unwrap())
            .build();

        let bin = Transaction::decode(&tx.encode().unwrap()).unwrap();
        assert!(bin.amount().is_none());
        assert!(bin.thread_id().is_none());
        assert!(bin.gas_price().is_none());

        let json = Transaction::from_json(&tx.to_json().unwrap()).unwrap();
        assert!(json.amount().is_none());
        assert!(json.thread_id().is_none());
        assert!(json.gas_price().is_none());
    }

    #[test]
    fn json_missing_integer_keys_decode_as_none() {
        let json = format!(
            r#"{{"token_hash":"{}","to":"","from":"","signature":"","block_from":[],"tx_from":[],"gas":0,"received_time":"1970-01-01T00:00:00Z"}}"#,
            Hash::zero()
        );
        let tx = Transaction::from_json(json.as_bytes()).unwrap();
        assert!(tx.amount().is_none());
        assert!(tx.gas_price().is_none());
    }

    #[test]
    fn json_missing_required_key_is_rejected() {
        let json = r#"{"gas":0}"#;
        assert!(Transaction::from_json(json.as_bytes())
            .unwrap_err()
            .is_decoding());
    }

    #[test]
    fn encode_into_reuses_buffer() {
        let tx = sample_tx();
        let mut buf = Vec::with_capacity(1024);
        tx.encode_into(&mut buf).unwrap();
        assert_eq!(buf, tx.encode().unwrap());

        buf.clear();
        tx.write_json(&mut buf).unwrap();
        assert_eq!(buf, tx.to_json().unwrap());
    }

    #[test]
    fn decoders_reject_wrong_and_truncated_input() {
        let tx = sample_tx();
        let bin = tx.encode().unwrap();
        let json = tx.to_json().unwrap();

        assert!(Transaction::from_json(&bin).unwrap_err().is_decoding());
        assert!(Transaction::decode(&json).unwrap_err().is_decoding());
        assert!(Transaction::decode(&bin[..bin.len() - 1])
            .unwrap_err()
            .is_decoding());
        assert!(Transaction::from_json(&json[..json.len() - 1])
            .unwrap_err()
            .is_decoding());
        assert!(Transaction::decode(&[]).unwrap_err().is_decoding());
    }
}
