//! # LedgerDb: Transaction Store
//!
//! Byte-keyed persistence for encoded transactions. Two backends:
//!
//! | Backend       | Engine                              | Use                 |
//! |---------------|-------------------------------------|---------------------|
//! | [`LedgerDb`]  | sled tree                           | node data directory |
//! | [`MemoryStore`] | `RwLock<BTreeMap<Vec<u8>, Vec<u8>>>` | tests and tools     |
//!
//! Both implement [`KeyValueStore`]. A transaction's key is its identity
//! hash (32 raw bytes) and its value is the compact binary encoding, so a
//! store written by one node can be read by any other.

use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::RwLock;
use sled::{Db, Tree};

use crate::config::DEFAULT_TX_STORE;
use crate::crypto::hash::Hash;
use crate::transaction::{Transaction, TransactionError};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("codec error: {0}")]
    Codec(#[from] TransactionError),
}

pub type DbResult<T> = Result<T, DbError>;

// ---------------------------------------------------------------------------
// KeyValueStore
// ---------------------------------------------------------------------------

/// A byte-keyed store that can hold transactions.
///
/// Implementors provide raw `get` and `put`. The transaction-level methods
/// are built on top of them.
pub trait KeyValueStore {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>>;

    /// Inserts or overwrites `key`.
    fn put(&self, key: &[u8], value: &[u8]) -> DbResult<()>;

    /// Stores `tx` under its identity hash and returns that hash.
    ///
    /// The hash is taken from the fields at call time. Storing the same
    /// transaction twice overwrites with identical bytes.
    fn put_transaction(&self, tx: &Transaction) -> DbResult<Hash> {
        let id = tx.identity_hash();
        let bytes = tx.encode()?;
        self.put(id.as_bytes(), &bytes)?;
        tracing::debug!(id = %id, len = bytes.len(), "transaction stored");
        Ok(id)
    }

    /// Loads the transaction stored under `id`, if any.
    fn get_transaction(&self, id: &Hash) -> DbResult<Option<Transaction>> {
        match self.get(id.as_bytes())? {
            Some(bytes) => {
                let tx = Transaction::decode(&bytes)?;
                tracing::trace!(id = %id, "transaction loaded");
                Ok(Some(tx))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// LedgerDb
// ---------------------------------------------------------------------------

/// sled-backed transaction store.
///
/// sled is thread-safe, so a `LedgerDb` can be shared via `Arc` or cloned
/// (clones share the same database).
#[derive(Debug, Clone)]
pub struct LedgerDb {
    db: Db,
    transactions: Tree,
}

impl LedgerDb {
    /// Open or create a database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path)?;
        tracing::debug!(path = %path.display(), "ledger store opened");
        Self::from_db(db)
    }

    /// Open the store called `name` under `root`, i.e. `<root>/<name>`.
    pub fn open_named<P: AsRef<Path>>(root: P, name: &str) -> DbResult<Self> {
        Self::open(root.as_ref().join(name))
    }

    /// In-memory database, removed when the last handle is dropped.
    pub fn open_temporary() -> DbResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> DbResult<Self> {
        let transactions = db.open_tree(DEFAULT_TX_STORE)?;
        Ok(Self { db, transactions })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Blocks until all pending writes are durable.
    pub fn flush(&self) -> DbResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl KeyValueStore for LedgerDb {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        Ok(self.transactions.get(key)?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.transactions.insert(key, value)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store. Many readers or one writer at a time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.entries.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
