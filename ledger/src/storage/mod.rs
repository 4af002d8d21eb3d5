//! # Storage Module
//!
//! Key-value persistence for encoded transactions.
//!
//! ```text
//! db.rs     - LedgerDb (sled) and MemoryStore (in-memory), plus the
//!             KeyValueStore trait both implement
//! ```
//!
//! A transaction is stored under its identity hash, as its compact binary
//! encoding. Any byte-keyed store can hold transactions by implementing
//! [`KeyValueStore::get`] and [`KeyValueStore::put`]; the typed
//! `put_transaction` / `get_transaction` come for free.

pub mod db;

pub use db::{DbError, DbResult, KeyValueStore, LedgerDb, MemoryStore};
